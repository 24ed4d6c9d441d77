//! TMDB API preflight check.

use super::CheckResult;
use crate::models::config::TmdbSettings;
use crate::services::tmdb::{TmdbClient, TmdbConfig};

/// Check if TMDB API is accessible.
pub async fn check(settings: &TmdbSettings) -> CheckResult {
    match TmdbConfig::from_settings(settings) {
        Ok(config) => match TmdbClient::new(config).verify_api_key().await {
            Ok(true) => CheckResult::ok("TMDB API", "connected"),
            Ok(false) => CheckResult::fail(
                "TMDB API",
                "invalid API key",
                "Check your TMDB_API_KEY environment variable",
            ),
            Err(_) => CheckResult::fail(
                "TMDB API",
                "connection failed",
                "Check your network connection",
            ),
        },
        Err(_) => CheckResult::fail(
            "TMDB API",
            "API key not configured",
            "Set TMDB_API_KEY environment variable",
        ),
    }
}
