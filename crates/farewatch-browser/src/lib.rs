mod chrome_finder;
mod error;
mod fetcher;
mod profile;
mod session;

pub use chrome_finder::ChromeFinder;
pub use error::{Error, Result};
pub use fetcher::{PriceFetcher, Step};
pub use profile::ProfileManager;
pub use session::{BrowserSession, SessionOptions};
