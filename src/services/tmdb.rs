//! TMDB API client.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::models::config::TmdbSettings;
use crate::models::movie::{Movie, MovieListResponse};
use crate::{Error, Result};

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Read-only movie catalog the search flow talks to.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// A page of movies ordered by descending popularity.
    async fn discover(&self, cancel: &CancellationToken) -> Result<Vec<Movie>>;

    /// Movies matching `query`.
    async fn search(&self, query: &str, cancel: &CancellationToken) -> Result<Vec<Movie>>;
}

/// TMDB client configuration.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key or Bearer token (JWT)
    pub api_key: String,
    pub language: String,
    /// Whether to use Bearer token authentication (API v4 style)
    pub use_bearer: bool,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl TmdbConfig {
    pub fn new(api_key: String) -> Self {
        // Bearer tokens start with "eyJ" (base64 encoded JWT header)
        let use_bearer = api_key.starts_with("eyJ");

        Self {
            api_key,
            language: "en-US".to_string(),
            use_bearer,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create config from environment variable.
    /// Supports both API key (v3) and Bearer token (v4) formats.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TMDB_API_KEY").map_err(|_| Error::TmdbApiKeyMissing)?;
        Ok(Self::new(api_key))
    }

    /// Create config from loaded settings.
    pub fn from_settings(settings: &TmdbSettings) -> Result<Self> {
        let api_key = settings.api_key.clone().ok_or(Error::TmdbApiKeyMissing)?;
        let mut config = Self::new(api_key);
        config.language = settings.language.clone();
        Ok(config)
    }
}

/// TMDB API client.
pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Create a new TMDB client from environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(TmdbConfig::from_env()?))
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url).header("accept", "application/json");
        if self.config.use_bearer {
            request.header("Authorization", format!("Bearer {}", self.config.api_key))
        } else {
            request
        }
    }

    /// Build URL with optional api_key parameter (only for v3 style).
    fn build_url(&self, path: &str, extra_params: &str) -> String {
        if self.config.use_bearer {
            format!(
                "{}/{}?language={}{}",
                TMDB_BASE_URL, path, self.config.language, extra_params
            )
        } else {
            format!(
                "{}/{}?api_key={}&language={}{}",
                TMDB_BASE_URL, path, self.config.api_key, self.config.language, extra_params
            )
        }
    }

    fn discover_url(&self) -> String {
        self.build_url("discover/movie", "&sort_by=popularity.desc")
    }

    fn search_url(&self, query: &str) -> String {
        self.build_url(
            "search/movie",
            &format!("&query={}", urlencoding::encode(query)),
        )
    }

    /// Verify API key is valid.
    pub async fn verify_api_key(&self) -> Result<bool> {
        let url = if self.config.use_bearer {
            format!("{}/authentication", TMDB_BASE_URL)
        } else {
            format!(
                "{}/authentication?api_key={}",
                TMDB_BASE_URL, self.config.api_key
            )
        };

        match self.build_request(&url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Issue one movie-list request, racing it against cancellation and the
    /// configured timeout. The timer and the token guard are dropped on every
    /// exit path.
    async fn fetch_movies(&self, url: String, cancel: &CancellationToken) -> Result<Vec<Movie>> {
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(Error::Timeout),
            _ = tokio::time::sleep(self.config.timeout) => return Err(Error::Timeout),
            resp = self.build_request(&url).send() => resp?,
        };

        if let Some(err) = classify_status(response.status().as_u16()) {
            return Err(err);
        }

        let body: MovieListResponse = response.json().await?;
        body.results.ok_or(Error::EmptyResult)
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn discover(&self, cancel: &CancellationToken) -> Result<Vec<Movie>> {
        self.fetch_movies(self.discover_url(), cancel).await
    }

    async fn search(&self, query: &str, cancel: &CancellationToken) -> Result<Vec<Movie>> {
        self.fetch_movies(self.search_url(query), cancel).await
    }
}

/// Map a non-2xx HTTP status to its error kind. 2xx maps to `None`.
pub fn classify_status(status: u16) -> Option<Error> {
    match status {
        200..=299 => None,
        401 => Some(Error::Auth),
        429 => Some(Error::RateLimited),
        500..=599 => Some(Error::Server),
        other => Some(Error::Http(other)),
    }
}

/// Image URL for a poster path at the given size.
pub fn poster_url(poster_path: &str, size: &str) -> String {
    format!("{}/{}{}", IMAGE_BASE_URL, size, poster_path)
}
