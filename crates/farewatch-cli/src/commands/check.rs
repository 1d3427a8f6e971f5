use anyhow::Result;
use std::path::PathBuf;

/// One-shot price check: run the protocol once and print the result.
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
        println!("🚀 Launching Chrome...");
        let fetcher = super::start_fetcher(&config).await?;

        println!(
            "🔍 Checking {} → {} on {}...",
            query.origin(),
            query.destination(),
            query.date_field()
        );

        // Always release the browser, even when the fetch failed.
        let outcome = fetcher.fetch(&query).await;
        let close_outcome = fetcher.close().await;

        let reading = outcome?;
        close_outcome?;

        println!("💰 Current price: {:.0}", reading.value);
        Ok(())
    });

    runtime.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
