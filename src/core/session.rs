//! Search session controller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::models::movie::Movie;
use crate::services::tally::TrendTally;
use crate::services::tmdb::MovieCatalog;

/// Current state of the search flow, as the view layer sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Idle,
    Loading,
    Success(Vec<Movie>),
    Error(String),
}

/// Orchestrates one query lifecycle at a time.
///
/// Exactly one outcome is current. Submitting a query cancels the in-flight
/// request and invalidates its generation, so only the most recently issued
/// request may publish — last-write-wins by issuance order, not completion
/// order.
pub struct SearchSession {
    inner: Arc<Inner>,
}

struct Inner {
    catalog: Arc<dyn MovieCatalog>,
    tally: Option<Arc<TrendTally>>,
    outcome: watch::Sender<SearchOutcome>,
    generation: AtomicU64,
    active: Mutex<Option<CancellationToken>>,
}

impl SearchSession {
    pub fn new(catalog: Arc<dyn MovieCatalog>, tally: Option<Arc<TrendTally>>) -> Self {
        let (outcome, _) = watch::channel(SearchOutcome::Idle);

        Self {
            inner: Arc::new(Inner {
                catalog,
                tally,
                outcome,
                generation: AtomicU64::new(0),
                active: Mutex::new(None),
            }),
        }
    }

    /// Subscribe to outcome transitions.
    pub fn subscribe(&self) -> watch::Receiver<SearchOutcome> {
        self.inner.outcome.subscribe()
    }

    /// Latest published outcome.
    pub fn current(&self) -> SearchOutcome {
        self.inner.outcome.borrow().clone()
    }

    /// Accept a settled query and start its request, superseding any
    /// in-flight one. An empty query runs discover mode.
    pub fn submit(&self, query: &str) {
        let inner = Arc::clone(&self.inner);
        let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let token = CancellationToken::new();
        if let Some(prev) = inner.active.lock().unwrap().replace(token.clone()) {
            prev.cancel();
        }

        inner.outcome.send_replace(SearchOutcome::Loading);

        let query = query.to_string();
        tokio::spawn(async move {
            let result = if query.is_empty() {
                inner.catalog.discover(&token).await
            } else {
                inner.catalog.search(&query, &token).await
            };

            if inner.generation.load(Ordering::SeqCst) != generation {
                debug!(%query, "dropping superseded search result");
                return;
            }

            match result {
                Ok(movies) => {
                    if !query.is_empty() {
                        if let (Some(tally), Some(first)) = (inner.tally.as_ref(), movies.first())
                        {
                            let tally = Arc::clone(tally);
                            let term = query.clone();
                            let movie = first.clone();
                            // Fire and forget: tally failures stay out of
                            // the search state.
                            tokio::spawn(async move {
                                tally.record(&term, &movie).await;
                            });
                        }
                    }
                    inner.outcome.send_replace(SearchOutcome::Success(movies));
                }
                Err(err) => {
                    inner
                        .outcome
                        .send_replace(SearchOutcome::Error(err.user_message()));
                }
            }
        });
    }

    /// Cancel the in-flight request and invalidate its generation so nothing
    /// mutates the outcome after teardown.
    pub fn shutdown(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(token) = self.inner.active.lock().unwrap().take() {
            token.cancel();
        }
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
