//! Appwrite trend tally client.
//!
//! The store is used purely as a per-search-term counter with a top-N read.
//! The four document operations the flow performs live behind
//! [`TallyBackend`] so the increment-or-insert semantics can be exercised
//! against an in-memory stand-in.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::models::config::TallySettings;
use crate::models::movie::Movie;
use crate::models::trending::TrendEntry;
use crate::services::tmdb;
use crate::{Error, Result};

/// Poster size stored alongside a tally entry.
const TALLY_POSTER_SIZE: &str = "w500";

/// Document operations the tally flow performs against the store.
#[async_trait]
pub trait TallyBackend: Send + Sync {
    /// List documents whose search term equals `term` exactly.
    async fn find_by_term(&self, term: &str) -> Result<Vec<TrendEntry>>;

    /// Set the count of an existing document.
    async fn set_count(&self, document_id: &str, count: u64) -> Result<()>;

    /// Create a new document with a generated id and count 1.
    async fn insert(&self, term: &str, movie_id: u64, poster_url: Option<String>) -> Result<()>;

    /// List up to `limit` documents ordered by count descending.
    async fn top_by_count(&self, limit: usize) -> Result<Vec<TrendEntry>>;
}

/// Appwrite REST implementation of [`TallyBackend`].
pub struct AppwriteBackend {
    endpoint: String,
    project_id: String,
    database_id: String,
    collection_id: String,
    client: reqwest::Client,
}

/// Document list response.
#[derive(Debug, Deserialize)]
struct DocumentList {
    documents: Vec<TrendEntry>,
}

impl AppwriteBackend {
    /// Create a backend from settings. Every identifier is required.
    pub fn new(settings: &TallySettings) -> Result<Self> {
        let (endpoint, project_id, database_id, collection_id) = match (
            &settings.endpoint,
            &settings.project_id,
            &settings.database_id,
            &settings.collection_id,
        ) {
            (Some(endpoint), Some(project), Some(database), Some(collection)) => (
                endpoint.trim_end_matches('/').to_string(),
                project.clone(),
                database.clone(),
                collection.clone(),
            ),
            _ => return Err(Error::TallyNotConfigured),
        };

        Ok(Self {
            endpoint,
            project_id,
            database_id,
            collection_id,
            client: reqwest::Client::new(),
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, self.collection_id
        )
    }

    /// Attach the project header to a request.
    fn with_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Appwrite-Project", &self.project_id)
            .header("accept", "application/json")
    }

    async fn list(&self, queries: &[serde_json::Value]) -> Result<Vec<TrendEntry>> {
        let mut request = self.client.get(self.documents_url());
        for query in queries {
            request = request.query(&[("queries[]", query.to_string())]);
        }

        let response = self.with_headers(request).send().await?;
        if let Some(err) = tmdb::classify_status(response.status().as_u16()) {
            return Err(err);
        }

        let list: DocumentList = response.json().await?;
        Ok(list.documents)
    }

    /// Check if the store is reachable.
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.endpoint);
        match self.with_headers(self.client.get(&url)).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

#[async_trait]
impl TallyBackend for AppwriteBackend {
    async fn find_by_term(&self, term: &str) -> Result<Vec<TrendEntry>> {
        self.list(&[json!({
            "method": "equal",
            "attribute": "searchTerm",
            "values": [term],
        })])
        .await
    }

    async fn set_count(&self, document_id: &str, count: u64) -> Result<()> {
        let url = format!("{}/{}", self.documents_url(), document_id);
        let body = json!({ "data": { "count": count } });

        let response = self
            .with_headers(self.client.patch(&url))
            .json(&body)
            .send()
            .await?;
        if let Some(err) = tmdb::classify_status(response.status().as_u16()) {
            return Err(err);
        }
        Ok(())
    }

    async fn insert(&self, term: &str, movie_id: u64, poster_url: Option<String>) -> Result<()> {
        let body = json!({
            "documentId": uuid::Uuid::new_v4().simple().to_string(),
            "data": {
                "searchTerm": term,
                "count": 1,
                "movie_id": movie_id,
                "poster_url": poster_url,
            },
        });

        let response = self
            .with_headers(self.client.post(self.documents_url()))
            .json(&body)
            .send()
            .await?;
        if let Some(err) = tmdb::classify_status(response.status().as_u16()) {
            return Err(err);
        }
        Ok(())
    }

    async fn top_by_count(&self, limit: usize) -> Result<Vec<TrendEntry>> {
        self.list(&[
            json!({ "method": "orderDesc", "attribute": "count" }),
            json!({ "method": "limit", "values": [limit] }),
        ])
        .await
    }
}

/// Best-effort search-term tally over a [`TallyBackend`].
pub struct TrendTally {
    backend: Arc<dyn TallyBackend>,
}

impl TrendTally {
    pub fn new(backend: Arc<dyn TallyBackend>) -> Self {
        Self { backend }
    }

    /// Increment the tally for `term`, inserting it on first sight with the
    /// representative movie's id and poster.
    ///
    /// Store failures are logged and swallowed; a failed tally update never
    /// blocks the search flow.
    pub async fn record(&self, term: &str, movie: &Movie) {
        if let Err(err) = self.try_record(term, movie).await {
            warn!(term, "failed to update search tally: {err}");
        }
    }

    async fn try_record(&self, term: &str, movie: &Movie) -> Result<()> {
        let existing = self.backend.find_by_term(term).await?;

        match existing.first() {
            Some(entry) => self.backend.set_count(&entry.id, entry.count + 1).await,
            None => {
                let poster_url = movie
                    .poster_path
                    .as_deref()
                    .map(|path| tmdb::poster_url(path, TALLY_POSTER_SIZE));
                self.backend.insert(term, movie.id, poster_url).await
            }
        }
    }

    /// Top trending entries, count descending, at most `limit` of them.
    ///
    /// Equal counts order most-recently-updated first, then by term, so the
    /// panel does not depend on store-default document order. A store failure
    /// yields an empty panel.
    pub async fn top_trending(&self, limit: usize) -> Vec<TrendEntry> {
        match self.backend.top_by_count(limit).await {
            Ok(mut entries) => {
                entries.sort_by(|a, b| {
                    b.count
                        .cmp(&a.count)
                        .then_with(|| b.updated_at.cmp(&a.updated_at))
                        .then_with(|| a.search_term.cmp(&b.search_term))
                });
                entries.truncate(limit);
                entries
            }
            Err(err) => {
                warn!("failed to load trending entries: {err}");
                Vec::new()
            }
        }
    }
}
