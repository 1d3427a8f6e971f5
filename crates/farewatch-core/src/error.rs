use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    #[error("Threshold must be a positive percentage, got {0}")]
    InvalidThreshold(f64),

    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Failures turning the site's price label into a number.
#[derive(Error, Debug)]
pub enum PriceError {
    #[error("No digits in price text: {0:?}")]
    NoDigits(String),

    #[error("Price text does not fit a number: {0:?}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, Error>;
