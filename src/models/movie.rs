//! Movie data models.

use serde::{Deserialize, Serialize};

/// A movie snapshot from the catalog. Never persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Catalog identifier, unique per catalog.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster path fragment (e.g., "/x.jpg").
    pub poster_path: Option<String>,
    /// Overview/synopsis.
    pub overview: Option<String>,
    /// Full release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// User rating (0.0-10.0).
    pub vote_average: Option<f32>,
    /// Original language code.
    pub original_language: Option<String>,
}

impl Movie {
    /// Release year, if the release date is known.
    pub fn year(&self) -> Option<&str> {
        self.release_date.as_deref().and_then(|d| d.get(..4))
    }
}

/// One page of movies from the catalog.
///
/// `results` stays optional: a 2xx response without the field is a malformed
/// response, which is not the same thing as an empty list.
#[derive(Debug, Deserialize)]
pub struct MovieListResponse {
    pub results: Option<Vec<Movie>>,
}
