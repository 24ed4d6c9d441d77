//! Error types for the movie finder.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the movie finder.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("TMDB API key not configured. Set TMDB_API_KEY environment variable")]
    TmdbApiKeyMissing,

    #[error("Trend store not configured. Set the APPWRITE_* environment variables")]
    TallyNotConfigured,

    // Catalog errors
    #[error("API key is invalid or missing")]
    Auth,

    #[error("Rate limited by the movie catalog")]
    RateLimited,

    #[error("Movie catalog server error")]
    Server,

    #[error("Unexpected HTTP status: {0}")]
    Http(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out or was cancelled")]
    Timeout,

    #[error("Response is missing the results field")]
    EmptyResult,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// User-facing message for the view layer.
    ///
    /// Every catalog error kind maps to a fixed string; anything outside the
    /// taxonomy falls through to the catch-all.
    pub fn user_message(&self) -> String {
        match self {
            Error::Auth | Error::TmdbApiKeyMissing => {
                "API key is invalid or missing".to_string()
            }
            Error::RateLimited => {
                "Too many requests, please try again in a moment".to_string()
            }
            Error::Server => {
                "The movie service is having trouble, please try again later".to_string()
            }
            Error::Http(status) => format!("Request failed with status {}", status),
            Error::Network(_) => {
                "Could not reach the movie service, check your connection".to_string()
            }
            Error::Timeout => "The request timed out, please try again".to_string(),
            Error::EmptyResult => {
                "The movie service returned an unexpected response".to_string()
            }
            _ => "Something went wrong, please try again later".to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_decode() {
            // Body did not match the response contract
            Error::EmptyResult
        } else {
            Error::Network(err.to_string())
        }
    }
}
