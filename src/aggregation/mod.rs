pub mod aggregator;
pub mod daily_accumulator;
pub mod error;
pub mod period_rollup;
pub mod transition;
