//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// TMDB configuration.
    pub tmdb: TmdbSettings,
    /// Trend tally store configuration.
    pub tally: TallySettings,
    /// Search flow tuning.
    pub search: SearchSettings,
}

/// TMDB configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbSettings {
    /// API key or Bearer token (JWT).
    pub api_key: Option<String>,
    /// Language for responses.
    pub language: String,
}

/// Trend tally store (Appwrite) configuration.
///
/// All four identifiers are required to reach the store; the trending panel
/// is simply disabled when any is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallySettings {
    /// Store endpoint URL.
    pub endpoint: Option<String>,
    /// Project identifier.
    pub project_id: Option<String>,
    /// Database identifier.
    pub database_id: Option<String>,
    /// Collection holding the tally documents.
    pub collection_id: Option<String>,
}

/// Search flow tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Debounce quiescence window in milliseconds.
    pub debounce_ms: u64,
    /// Catalog request timeout in seconds.
    pub timeout_secs: u64,
    /// Number of entries shown in the trending panel.
    pub trending_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb: TmdbSettings::default(),
            tally: TallySettings::default(),
            search: SearchSettings::default(),
        }
    }
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_key: std::env::var("TMDB_API_KEY").ok(),
            language: "en-US".to_string(),
        }
    }
}

impl Default for TallySettings {
    fn default() -> Self {
        Self {
            endpoint: std::env::var("APPWRITE_ENDPOINT").ok(),
            project_id: std::env::var("APPWRITE_PROJECT_ID").ok(),
            database_id: std::env::var("APPWRITE_DATABASE_ID").ok(),
            collection_id: std::env::var("APPWRITE_COLLECTION_ID").ok(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            timeout_secs: 10,
            trending_limit: 5,
        }
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("movie_finder")
}

/// Load configuration from a specific file. `None` when the file is missing
/// or does not parse.
pub fn load_config_from(path: &std::path::Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Load configuration from file.
pub fn load_config() -> Config {
    load_config_from(&dirs_config_path().join("config.toml")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let content = r#"
            [tmdb]
            api_key = "abc123"
            language = "en-US"

            [tally]
            endpoint = "https://cloud.appwrite.io/v1"
            project_id = "proj"
            database_id = "db"
            collection_id = "metrics"

            [search]
            debounce_ms = 500
            timeout_secs = 5
            trending_limit = 3
        "#;

        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.tmdb.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.search.debounce_ms, 500);
        assert_eq!(config.search.trending_limit, 3);
        assert_eq!(config.tally.collection_id.as_deref(), Some("metrics"));
    }

    #[test]
    fn test_defaults_match_observed_usage() {
        let search = SearchSettings::default();
        assert_eq!(search.debounce_ms, 1000);
        assert_eq!(search.timeout_secs, 10);
        assert_eq!(search.trending_limit, 5);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
                [tmdb]
                language = "de-DE"

                [tally]

                [search]
                debounce_ms = 250
                timeout_secs = 10
                trending_limit = 5
            "#,
        )
        .unwrap();

        let config = load_config_from(&config_path).unwrap();
        assert_eq!(config.tmdb.language, "de-DE");
        assert_eq!(config.search.debounce_ms, 250);

        assert!(load_config_from(&temp_dir.path().join("missing.toml")).is_none());
    }
}
