pub mod error;
pub mod summary_store;
