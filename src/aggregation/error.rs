use crate::types::forecast_entry::EntryField;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AggregationError {
    #[error("Forecast entry {index} is missing or has an invalid '{field}'")]
    MalformedEntry { index: usize, field: EntryField },

    #[error("Forecast feed contains no entries")]
    EmptyFeed,
}
