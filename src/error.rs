use crate::aggregation::error::AggregationError;
use crate::feed::error::FeedError;
use crate::feed::location_query::QueryError;
use crate::storage::error::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error("Forecast feed unavailable")]
    FeedUnavailable(#[from] FeedError),

    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_feed_errors_are_opaque_but_keep_their_source() {
        let err = ForecastError::from(FeedError::MissingList);
        assert_eq!(err.to_string(), "Forecast feed unavailable");
        let source = err.source().unwrap();
        assert!(source.to_string().contains("'list'"));
    }

    #[test]
    fn test_aggregation_errors_are_transparent() {
        let err = ForecastError::from(AggregationError::EmptyFeed);
        assert_eq!(err.to_string(), "Forecast feed contains no entries");
    }
}
