use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("No API key configured; set the {0} environment variable")]
    MissingApiKey(&'static str),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Forecast API error {code}: {message}")]
    Api { code: String, message: String },

    #[error("Forecast response has no 'list' of entries; check the API key")]
    MissingList,

    #[error("Forecast response has no 'city' block")]
    MissingCity,

    #[error("Failed to decode forecast response")]
    Decode(#[from] serde_json::Error),
}
