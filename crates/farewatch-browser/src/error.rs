use crate::fetcher::Step;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    /// A required page element never reached the expected state inside the
    /// bounded wait window. Names the protocol step that was pending.
    #[error("Step `{step}` did not complete within {timeout_secs}s")]
    StepTimeout { step: Step, timeout_secs: u64 },

    #[error("Price text could not be parsed: {0}")]
    Price(#[from] farewatch_core::PriceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
