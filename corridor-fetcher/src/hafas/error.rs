//! Timetable source error types.

/// Errors from the HAFAS REST client.
#[derive(Debug, thiserror::Error)]
pub enum HafasError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by timetable API")]
    RateLimited,

    /// Canned timetable data could not be read from disk
    #[error("mock data error: {0}")]
    MockData(String),

    /// Client could not be constructed from its configuration
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (body: {body})"),
        None => String::new(),
    }
}
