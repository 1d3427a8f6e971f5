use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

fn default_wait_timeout() -> u64 {
    20
}

fn default_check_interval() -> u64 {
    60
}

fn default_headless() -> bool {
    true
}

fn default_smtp_port() -> u16 {
    587
}

/// Runtime configuration, loaded from a JSON file before monitoring starts.
/// A load or validation failure here is fatal - the watch loop never runs
/// against a half-formed config.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Booking site search page.
    pub url: String,

    /// Bounded wait applied to every UI-dependent protocol step.
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout_secs: u64,

    /// Fixed interval between ticks.
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,

    /// Minimum absolute percentage change that triggers an alert.
    pub threshold_percent: f64,

    /// Explicit Chrome binary; platform defaults are searched when unset.
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    /// Persistent Chrome profile directory; a throwaway one is used when unset.
    #[serde(default)]
    pub profile_dir: Option<PathBuf>,

    #[serde(default = "default_headless")]
    pub headless: bool,

    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,

    #[serde(default = "default_smtp_port")]
    pub port: u16,

    pub username: String,
    pub password: String,

    /// Sender address, e.g. "Farewatch <alerts@example.com>".
    pub from: String,

    /// Recipient address.
    pub to: String,
}

impl Config {
    /// Read and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Reading config from: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse and validate a config from a JSON string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Default location: `~/.farewatch/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".farewatch").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.url)
            .map_err(|e| Error::InvalidConfig(format!("url {:?}: {}", self.url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::InvalidConfig(format!(
                "url must be http(s), got {:?}",
                self.url
            )));
        }

        if !self.threshold_percent.is_finite() || self.threshold_percent <= 0.0 {
            return Err(Error::InvalidThreshold(self.threshold_percent));
        }

        if self.wait_timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "wait_timeout_secs must be positive".to_string(),
            ));
        }

        if self.check_interval_secs == 0 {
            return Err(Error::InvalidConfig(
                "check_interval_secs must be positive".to_string(),
            ));
        }

        if self.smtp.host.is_empty() {
            return Err(Error::InvalidConfig("smtp.host is empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(url: &str, threshold: f64) -> String {
        format!(
            r#"{{
                "url": "{url}",
                "threshold_percent": {threshold},
                "smtp": {{
                    "host": "smtp.example.com",
                    "username": "alerts",
                    "password": "secret",
                    "from": "alerts@example.com",
                    "to": "me@example.com"
                }}
            }}"#
        )
    }

    #[test]
    fn test_parse_minimal_config_applies_defaults() {
        let config = Config::from_str(&minimal("https://booking.example.com", 5.0)).unwrap();

        assert_eq!(config.wait_timeout_secs, 20);
        assert_eq!(config.check_interval_secs, 60);
        assert_eq!(config.smtp.port, 587);
        assert!(config.headless);
        assert!(config.chrome_path.is_none());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let result = Config::from_str(&minimal("ftp://booking.example.com", 5.0));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_unparseable_url() {
        let result = Config::from_str(&minimal("not a url", 5.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let result = Config::from_str(&minimal("https://booking.example.com", 0.0));
        assert!(matches!(result, Err(Error::InvalidThreshold(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = Config::from_str("{ not json");
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
