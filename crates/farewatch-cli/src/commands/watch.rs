use anyhow::Result;
use farewatch_core::{MonitorState, PriceMonitor, TickOutcome};
use farewatch_notify::EmailNotifier;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// The monitoring loop: one serial tick per interval, Ctrl-C to stop, the
/// browser session released on every exit path.
pub fn execute(
    config_path: Option<PathBuf>,
    origin: Option<String>,
    destination: Option<String>,
    date: Option<String>,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let query = super::resolve_query(origin, destination, date)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        let notifier = EmailNotifier::new(&config.smtp)?;

        println!("🚀 Launching Chrome...");
        let fetcher = super::start_fetcher(&config).await?;

        let state = MonitorState::new(config.threshold_percent)?;
        let mut monitor = PriceMonitor::new(fetcher, notifier, state);

        println!(
            "👀 Watching {} → {} on {} (every {}s, threshold {}%)",
            query.origin(),
            query.destination(),
            query.date_field(),
            config.check_interval_secs,
            config.threshold_percent
        );
        println!("   Press Ctrl-C to stop");

        let mut interval = tokio::time::interval(Duration::from_secs(config.check_interval_secs));
        // A slow fetch delays the next tick instead of stacking ticks; the
        // browser session is not reentrant.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    println!("\n🛑 Stopping...");
                    break;
                }
                _ = interval.tick() => {
                    match monitor.tick(&query).await {
                        TickOutcome::Baselined { baseline } => {
                            println!("📌 Baseline price: {:.0}", baseline);
                        }
                        TickOutcome::WithinThreshold { change_percent } => {
                            println!("✅ Within threshold ({:+.2}%)", change_percent);
                        }
                        TickOutcome::Alerted { change_percent } => {
                            println!("📧 Alert sent ({:+.2}%)", change_percent);
                        }
                        TickOutcome::AlertFailed { change_percent } => {
                            println!(
                                "⚠️  Price moved {:+.2}% but the alert could not be delivered",
                                change_percent
                            );
                        }
                        TickOutcome::FetchFailed => {
                            println!("⚠️  Check failed, retrying on the next tick");
                        }
                    }
                }
            }
        }

        let (fetcher, _notifier) = monitor.into_parts();
        fetcher.close().await?;
        println!("✅ Browser closed");
        Ok(())
    });

    runtime.shutdown_timeout(Duration::from_millis(100));

    result
}
