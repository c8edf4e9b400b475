pub mod error;
pub mod forecast_feed;
pub mod location_query;
pub mod openweathermap_client;
