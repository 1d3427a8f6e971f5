use crate::{Error, Result};
use chrono::NaiveDate;

/// Date format the site's calendar input expects (DD.MM.YYYY).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// The route and date to watch. Immutable for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    origin: String,
    destination: String,
    date: NaiveDate,
}

impl SearchQuery {
    /// Build a query from raw input, validating the date against the
    /// DD.MM.YYYY form the booking site uses.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        date: &str,
    ) -> Result<Self> {
        let origin = origin.into();
        let destination = destination.into();

        if origin.trim().is_empty() {
            return Err(Error::InvalidQuery("origin city is empty".to_string()));
        }
        if destination.trim().is_empty() {
            return Err(Error::InvalidQuery("destination city is empty".to_string()));
        }

        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|e| {
            Error::InvalidQuery(format!("date {:?} is not in DD.MM.YYYY form: {}", date, e))
        })?;

        Ok(Self {
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            date,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The text typed into the site's date input.
    pub fn date_field(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}
