mod email;
mod error;

pub use email::EmailNotifier;
pub use error::{Error, Result};
