pub mod check;
pub mod completion;
pub mod watch;

use anyhow::Result;
use console::Term;
use farewatch_browser::{BrowserSession, PriceFetcher, SessionOptions};
use farewatch_core::{Config, SearchQuery};
use std::path::PathBuf;
use std::time::Duration;

/// Load the config from the explicit flag or the default location.
pub(crate) fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None => Config::default_path().ok_or_else(|| {
            anyhow::anyhow!("Could not determine home directory; pass --config")
        })?,
    };

    let config = Config::from_file(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Build the search query, prompting on the terminal for anything missing.
pub(crate) fn resolve_query(
    origin: Option<String>,
    destination: Option<String>,
    date: Option<String>,
) -> Result<SearchQuery> {
    let term = Term::stdout();
    let origin = prompt_if_missing(&term, origin, "Departure city")?;
    let destination = prompt_if_missing(&term, destination, "Destination city")?;
    let date = prompt_if_missing(&term, date, "Travel date (DD.MM.YYYY)")?;

    Ok(SearchQuery::new(origin, destination, &date)?)
}

fn prompt_if_missing(term: &Term, value: Option<String>, label: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    term.write_str(&format!("{}: ", label))?;
    Ok(term.read_line()?)
}

/// Launch Chrome and wrap it in a fetcher configured from the loaded config.
pub(crate) async fn start_fetcher(config: &Config) -> Result<PriceFetcher> {
    let session = BrowserSession::launch(SessionOptions {
        chrome_path: config.chrome_path.clone(),
        profile_dir: config.profile_dir.clone(),
        headless: config.headless,
    })
    .await?;

    Ok(PriceFetcher::new(
        session,
        config.url.clone(),
        Duration::from_secs(config.wait_timeout_secs),
    ))
}
