pub mod config;
pub mod error;
pub mod monitor;
pub mod price;
pub mod query;

pub use config::{Config, SmtpConfig};
pub use error::{Error, PriceError, Result};
pub use monitor::{AlertSink, MonitorState, PriceMonitor, PriceSource, TickOutcome};
pub use price::{PriceReading, parse_price};
pub use query::SearchQuery;
