//! Trend tally data models.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One per-search-term tally document from the trend store.
///
/// The store holds at most one entry per distinct term; `count` only moves
/// through the store's own update path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrendEntry {
    /// Document identifier assigned by the store.
    #[serde(rename = "$id")]
    pub id: String,
    /// The search term, acting as the natural key.
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    /// Number of times the term has been searched.
    pub count: u64,
    /// Representative movie for the term (first search hit).
    pub movie_id: u64,
    /// Poster URL derived from the representative movie.
    pub poster_url: Option<String>,
    /// Last update time, used as the tie-break for equal counts.
    #[serde(rename = "$updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}
