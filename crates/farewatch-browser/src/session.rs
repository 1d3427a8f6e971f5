use crate::{ChromeFinder, Error, ProfileManager, Result};
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::PathBuf;
use tokio::task::JoinHandle;

/// How to start the automation session.
#[derive(Debug, Default)]
pub struct SessionOptions {
    pub chrome_path: Option<PathBuf>,
    pub profile_dir: Option<PathBuf>,
    pub headless: bool,
}

/// Owns one Chrome process, its CDP handler task, and the single tab every
/// fetch runs in. Nothing else touches the automation handles.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    // Held so a throwaway profile outlives the Chrome process.
    _profile: ProfileManager,
}

impl BrowserSession {
    /// Launch Chrome and open the tab fetches will reuse.
    pub async fn launch(options: SessionOptions) -> Result<Self> {
        let chrome_binary = ChromeFinder::new(options.chrome_path).find()?;
        tracing::info!("Launching Chrome from {}", chrome_binary.display());

        let profile = match options.profile_dir {
            Some(path) => ProfileManager::persistent(path)?,
            None => ProfileManager::temporary()?,
        };

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_binary)
            .user_data_dir(profile.path())
            .window_size(1920, 1200)
            .arg("--disable-gpu");
        if !options.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(Error::Browser)?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler task must run for any CDP command to complete.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    // Some CDP events are not fully parseable; keep going.
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        tracing::debug!("Browser session ready");

        Ok(Self {
            browser,
            page,
            handler_task,
            _profile: profile,
        })
    }

    /// The tab the interaction protocol runs in.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Shut Chrome down and stop the CDP handler. Callers run this on every
    /// exit path so the automation resource is always released.
    pub async fn close(mut self) -> Result<()> {
        tracing::info!("Closing browser session");
        self.browser.close().await?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_use_throwaway_profile() {
        let options = SessionOptions::default();
        assert!(options.chrome_path.is_none());
        assert!(options.profile_dir.is_none());
        assert!(!options.headless);
    }

    // Launch/close tests require a Chrome install and run as part of the
    // CLI's end-to-end checks.
}
