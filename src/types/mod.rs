pub mod forecast_entry;
pub mod summary;
