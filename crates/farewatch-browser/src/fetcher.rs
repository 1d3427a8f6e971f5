use crate::session::BrowserSession;
use crate::{Error, Result};
use async_trait::async_trait;
use chromiumoxide::element::Element;
use farewatch_core::{PriceReading, PriceSource, SearchQuery, parse_price};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

// Selectors for the booking site's search flow, fixed for its current
// markup version.
const SEARCH_FORM: &str = ".main-module__search-form__inner";
const ORIGIN_INPUT: &str = "#ticket-city-departure-0-booking";
const DESTINATION_INPUT: &str = "#ticket-city-arrival-0-booking";
const DATE_INPUT: &str = "#ticket-date-from-booking";
const SUGGESTION_ITEM: &str = "div.suggestion-item";
const DATE_PICKER: &str = ".pika-single";
const SUBMIT_BUTTON: &str = "button.main-module__button--lg";
const PRICE_CHART: &str = ".price-chart";
const ACTIVE_PRICE: &str = ".price-chart__item--active .price-chart__item-price";

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// The ordered steps of the price-discovery protocol. A timeout names the
/// step that was pending, so failures point at a concrete part of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    SearchForm,
    OriginField,
    OriginSuggestion,
    DestinationField,
    DestinationSuggestion,
    DateField,
    DatePicker,
    SubmitSearch,
    ResultsChart,
    ActivePrice,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::SearchForm => "search-form",
            Step::OriginField => "origin-field",
            Step::OriginSuggestion => "origin-suggestion",
            Step::DestinationField => "destination-field",
            Step::DestinationSuggestion => "destination-suggestion",
            Step::DateField => "date-field",
            Step::DatePicker => "date-picker",
            Step::SubmitSearch => "submit-search",
            Step::ResultsChart => "results-chart",
            Step::ActivePrice => "active-price",
        };
        f.write_str(name)
    }
}

/// Case-insensitive containment check used to pick an autocomplete entry.
/// The site prefixes labels with airport codes, so exact equality is too
/// strict; the first containing match wins.
fn suggestion_matches(label: &str, city: &str) -> bool {
    label.to_lowercase().contains(&city.to_lowercase())
}

/// Drives the search form through the fixed interaction protocol and
/// extracts one price per call. Owns the browser session; every fetch is a
/// fresh navigation in the same tab.
pub struct PriceFetcher {
    session: BrowserSession,
    url: String,
    timeout: Duration,
}

impl PriceFetcher {
    pub fn new(session: BrowserSession, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            session,
            url: url.into(),
            timeout,
        }
    }

    /// Run the full protocol once:
    /// navigate -> origin -> destination -> date -> submit -> extract.
    ///
    /// No retries here; the monitoring loop decides what a failed fetch
    /// means.
    pub async fn fetch(&self, query: &SearchQuery) -> Result<PriceReading> {
        tracing::debug!("Navigating to {}", self.url);
        match tokio::time::timeout(self.timeout, self.page().goto(self.url.as_str())).await {
            Ok(navigated) => {
                navigated?;
            }
            Err(_) => return Err(self.step_timeout(Step::SearchForm)),
        }
        self.wait_for(Step::SearchForm, SEARCH_FORM).await?;

        self.fill_city(
            Step::OriginField,
            Step::OriginSuggestion,
            ORIGIN_INPUT,
            query.origin(),
        )
        .await?;
        self.fill_city(
            Step::DestinationField,
            Step::DestinationSuggestion,
            DESTINATION_INPUT,
            query.destination(),
        )
        .await?;
        self.set_date(&query.date_field()).await?;

        let submit = self.wait_for(Step::SubmitSearch, SUBMIT_BUTTON).await?;
        submit.click().await?;

        self.wait_for(Step::ResultsChart, PRICE_CHART).await?;
        let price_element = self.wait_for(Step::ActivePrice, ACTIVE_PRICE).await?;
        let text = price_element.inner_text().await?.unwrap_or_default();

        let value = parse_price(&text)?;
        tracing::info!("Extracted price {} from {:?}", value, text);
        Ok(PriceReading::now(value))
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.session.close().await
    }

    fn page(&self) -> &chromiumoxide::Page {
        self.session.page()
    }

    fn step_timeout(&self, step: Step) -> Error {
        Error::StepTimeout {
            step,
            timeout_secs: self.timeout.as_secs(),
        }
    }

    /// Poll for an element until it appears or the wait window closes.
    async fn wait_for(&self, step: Step, selector: &str) -> Result<Element> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Ok(element) = self.page().find_element(selector).await {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                tracing::warn!("Step `{}` timed out waiting for {:?}", step, selector);
                return Err(self.step_timeout(step));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Clear a city input, type the city name, and pick the autocomplete
    /// entry whose label contains it.
    async fn fill_city(
        &self,
        field_step: Step,
        suggestion_step: Step,
        selector: &str,
        city: &str,
    ) -> Result<()> {
        let field = self.wait_for(field_step, selector).await?;
        field.click().await?;
        // Select-all so typing replaces any prefilled value.
        field
            .call_js_fn("function() { this.select(); }", false)
            .await?;
        field.type_str(city).await?;

        let suggestion = self.wait_for_suggestion(suggestion_step, city).await?;
        suggestion.click().await?;
        Ok(())
    }

    /// Poll the suggestion list for the first entry matching the typed city.
    async fn wait_for_suggestion(&self, step: Step, city: &str) -> Result<Element> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Ok(items) = self.page().find_elements(SUGGESTION_ITEM).await {
                for item in items {
                    if let Ok(Some(label)) = item.inner_text().await {
                        if suggestion_matches(&label, city) {
                            tracing::debug!("Picked suggestion {:?} for {:?}", label, city);
                            return Ok(item);
                        }
                    }
                }
            }
            if Instant::now() >= deadline {
                tracing::warn!("Step `{}` timed out: no suggestion matched {:?}", step, city);
                return Err(self.step_timeout(step));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Open the calendar, type the date over the current value, confirm
    /// with Enter.
    async fn set_date(&self, date: &str) -> Result<()> {
        let field = self.wait_for(Step::DateField, DATE_INPUT).await?;
        field.click().await?;

        // The picker overlay must render before the field accepts a typed
        // date.
        self.wait_for(Step::DatePicker, DATE_PICKER).await?;

        field
            .call_js_fn("function() { this.select(); }", false)
            .await?;
        field.type_str(date).await?;
        field.press_key("Enter").await?;
        Ok(())
    }
}

#[async_trait]
impl PriceSource for PriceFetcher {
    type Error = Error;

    async fn fetch(&mut self, query: &SearchQuery) -> Result<PriceReading> {
        PriceFetcher::fetch(self, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_names_are_stable() {
        assert_eq!(Step::SearchForm.to_string(), "search-form");
        assert_eq!(Step::OriginSuggestion.to_string(), "origin-suggestion");
        assert_eq!(Step::ActivePrice.to_string(), "active-price");
    }

    #[test]
    fn test_timeout_error_names_the_pending_step() {
        let err = Error::StepTimeout {
            step: Step::OriginSuggestion,
            timeout_secs: 20,
        };
        assert_eq!(
            err.to_string(),
            "Step `origin-suggestion` did not complete within 20s"
        );
    }

    #[test]
    fn test_suggestion_matching_is_contains_and_case_insensitive() {
        assert!(suggestion_matches("SVO Moscow, Sheremetyevo", "Moscow"));
        assert!(suggestion_matches("moscow", "Moscow"));
        assert!(!suggestion_matches("St. Petersburg", "Moscow"));
    }

    // Protocol tests against a live page require a Chrome install and the
    // target site; the monitor-level behavior is covered with scripted
    // sources in farewatch-core.
}
