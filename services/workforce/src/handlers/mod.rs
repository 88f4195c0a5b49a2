pub mod assignment;
pub mod dashboard;
pub mod document;
pub mod health;
pub mod ledger;
pub mod meeting;
pub mod messaging;
pub mod site;
pub mod staff;

use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;

use crate::error::WorkforceServiceError;

/// Parse a raw query string with `serde_qs`; absent means `T::default()`.
pub(crate) fn parse_query<T: DeserializeOwned + Default>(
    raw_query: Option<String>,
) -> Result<T, WorkforceServiceError> {
    Ok(raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| WorkforceServiceError::InvalidInput("query string is invalid"))?
        .unwrap_or_default())
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
