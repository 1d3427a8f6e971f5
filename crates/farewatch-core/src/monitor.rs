use crate::price::PriceReading;
use crate::query::SearchQuery;
use crate::{Error, Result};
use async_trait::async_trait;

/// Produces one price reading per call. Implemented by the browser fetcher;
/// tests script it with canned outcomes.
#[async_trait]
pub trait PriceSource {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch(
        &mut self,
        query: &SearchQuery,
    ) -> std::result::Result<PriceReading, Self::Error>;
}

/// Delivers an alert given the baseline and current prices. Formatting and
/// transport are the implementer's concern.
#[async_trait]
pub trait AlertSink {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn send_price_alert(
        &self,
        baseline: f64,
        current: f64,
    ) -> std::result::Result<(), Self::Error>;
}

/// Baseline plus threshold. Starts without a baseline; the first successful
/// reading sets it, once, for the life of the run. Every later reading is
/// compared against that fixed value, never against the previous reading.
#[derive(Debug)]
pub struct MonitorState {
    baseline: Option<PriceReading>,
    threshold_percent: f64,
}

impl MonitorState {
    pub fn new(threshold_percent: f64) -> Result<Self> {
        if !threshold_percent.is_finite() || threshold_percent <= 0.0 {
            return Err(Error::InvalidThreshold(threshold_percent));
        }

        Ok(Self {
            baseline: None,
            threshold_percent,
        })
    }

    pub fn baseline(&self) -> Option<&PriceReading> {
        self.baseline.as_ref()
    }

    pub fn is_baselined(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn threshold_percent(&self) -> f64 {
        self.threshold_percent
    }

    /// Percentage change of `current` against the baseline. Undefined (None)
    /// until the baseline is set.
    pub fn change_percent(&self, current: f64) -> Option<f64> {
        self.baseline
            .map(|baseline| (current - baseline.value) / baseline.value * 100.0)
    }

    pub fn exceeds_threshold(&self, change_percent: f64) -> bool {
        change_percent.abs() >= self.threshold_percent
    }

    fn establish(&mut self, reading: PriceReading) {
        debug_assert!(self.baseline.is_none(), "baseline is set exactly once");
        self.baseline = Some(reading);
    }
}

/// What a single tick did. The loop driver reports it; tests assert on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// First successful reading; no alert by design.
    Baselined { baseline: f64 },
    /// Reading landed inside the threshold band.
    WithinThreshold { change_percent: f64 },
    /// Threshold breached and the alert went out.
    Alerted { change_percent: f64 },
    /// Threshold breached but delivery failed; state is preserved.
    AlertFailed { change_percent: f64 },
    /// The fetch itself failed; state untouched, next tick proceeds.
    FetchFailed,
}

/// Owns the recurring check: one fetch per tick, baseline comparison, and
/// the decision to alert. A tick never returns an error - every failure is
/// absorbed into its outcome so the scheduling loop cannot be taken down.
pub struct PriceMonitor<S, N> {
    source: S,
    sink: N,
    state: MonitorState,
}

impl<S: PriceSource, N: AlertSink> PriceMonitor<S, N> {
    pub fn new(source: S, sink: N, state: MonitorState) -> Self {
        Self {
            source,
            sink,
            state,
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Hand back the collaborators, e.g. to close the browser session.
    pub fn into_parts(self) -> (S, N) {
        (self.source, self.sink)
    }

    pub async fn tick(&mut self, query: &SearchQuery) -> TickOutcome {
        let reading = match self.source.fetch(query).await {
            Ok(reading) => reading,
            Err(e) => {
                tracing::warn!("Price check failed, keeping previous state: {}", e);
                return TickOutcome::FetchFailed;
            }
        };

        let baseline = match self.state.baseline() {
            Some(baseline) => baseline.value,
            None => {
                tracing::info!("Baseline price established: {}", reading.value);
                self.state.establish(reading);
                return TickOutcome::Baselined {
                    baseline: reading.value,
                };
            }
        };

        let change_percent = (reading.value - baseline) / baseline * 100.0;
        tracing::debug!(
            "Price {} vs baseline {}: {:+.2}%",
            reading.value,
            baseline,
            change_percent
        );

        if !self.state.exceeds_threshold(change_percent) {
            return TickOutcome::WithinThreshold { change_percent };
        }

        match self.sink.send_price_alert(baseline, reading.value).await {
            Ok(()) => TickOutcome::Alerted { change_percent },
            Err(e) => {
                tracing::error!("Alert delivery failed: {}", e);
                TickOutcome::AlertFailed { change_percent }
            }
        }
    }
}
