//! Integration tests for the trend tally client.
//!
//! Tests cover:
//! - Increment-or-insert semantics (one entry per term)
//! - Top-N ordering, limit, and tie-break
//! - Failure swallowing at the store boundary

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use movie_finder::models::movie::Movie;
use movie_finder::models::trending::TrendEntry;
use movie_finder::services::tally::{TallyBackend, TrendTally};
use movie_finder::{Error, Result};

fn movie(id: u64, poster_path: Option<&str>) -> Movie {
    Movie {
        id,
        title: "some movie".to_string(),
        poster_path: poster_path.map(|p| p.to_string()),
        overview: None,
        release_date: None,
        vote_average: None,
        original_language: None,
    }
}

fn entry(term: &str, count: u64, updated_at: DateTime<Utc>) -> TrendEntry {
    TrendEntry {
        id: format!("seed-{term}"),
        search_term: term.to_string(),
        count,
        movie_id: 1,
        poster_url: None,
        updated_at: Some(updated_at),
    }
}

/// In-memory document store standing in for the hosted one.
#[derive(Default)]
struct InMemoryBackend {
    entries: Mutex<Vec<TrendEntry>>,
    next_id: AtomicU64,
    fail: AtomicBool,
}

impl InMemoryBackend {
    fn seed(&self, entries: Vec<TrendEntry>) {
        *self.entries.lock().unwrap() = entries;
    }

    fn check(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Server);
        }
        Ok(())
    }
}

#[async_trait]
impl TallyBackend for InMemoryBackend {
    async fn find_by_term(&self, term: &str) -> Result<Vec<TrendEntry>> {
        self.check()?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.search_term == term)
            .cloned()
            .collect())
    }

    async fn set_count(&self, document_id: &str, count: u64) -> Result<()> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .iter_mut()
            .find(|e| e.id == document_id)
            .expect("unknown document id");
        entry.count = count;
        entry.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn insert(&self, term: &str, movie_id: u64, poster_url: Option<String>) -> Result<()> {
        self.check()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().push(TrendEntry {
            id: format!("doc-{id}"),
            search_term: term.to_string(),
            count: 1,
            movie_id,
            poster_url,
            updated_at: Some(Utc::now()),
        });
        Ok(())
    }

    async fn top_by_count(&self, limit: usize) -> Result<Vec<TrendEntry>> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap().clone();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(limit);
        Ok(entries)
    }
}

#[tokio::test]
async fn test_record_same_term_twice_yields_one_entry_with_count_two() {
    let backend = Arc::new(InMemoryBackend::default());
    let tally = TrendTally::new(backend.clone());

    tally.record("dune", &movie(42, Some("/x.jpg"))).await;
    tally.record("dune", &movie(42, Some("/x.jpg"))).await;

    let entries = backend.entries.lock().unwrap().clone();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].search_term, "dune");
    assert_eq!(entries[0].count, 2);
    assert_eq!(entries[0].movie_id, 42);
    assert_eq!(
        entries[0].poster_url.as_deref(),
        Some("https://image.tmdb.org/t/p/w500/x.jpg")
    );
}

#[tokio::test]
async fn test_record_distinct_terms_creates_distinct_entries() {
    let backend = Arc::new(InMemoryBackend::default());
    let tally = TrendTally::new(backend.clone());

    tally.record("dune", &movie(42, None)).await;
    tally.record("alien", &movie(7, None)).await;

    let entries = backend.entries.lock().unwrap().clone();
    assert_eq!(entries.len(), 2);
    // No poster path on the movie means no poster URL on the entry.
    assert!(entries.iter().all(|e| e.poster_url.is_none()));
}

#[tokio::test]
async fn test_top_trending_respects_limit_and_descending_order() {
    let backend = Arc::new(InMemoryBackend::default());
    let base = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
    backend.seed(vec![
        entry("alien", 3, base),
        entry("blade runner", 1, base),
        entry("dune", 5, base),
        entry("matrix", 2, base),
        entry("inception", 7, base),
        entry("arrival", 4, base),
    ]);
    let tally = TrendTally::new(backend);

    let top = tally.top_trending(5).await;
    assert_eq!(top.len(), 5);

    let counts: Vec<u64> = top.iter().map(|e| e.count).collect();
    assert_eq!(counts, vec![7, 5, 4, 3, 2]);
    assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn test_top_trending_tie_break_prefers_recently_updated() {
    let backend = Arc::new(InMemoryBackend::default());
    let older = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
    let newer = Utc.with_ymd_and_hms(2026, 8, 2, 12, 0, 0).unwrap();
    backend.seed(vec![
        entry("alien", 5, older),
        entry("dune", 5, newer),
        entry("matrix", 5, older),
    ]);
    let tally = TrendTally::new(backend);

    let top = tally.top_trending(5).await;
    let terms: Vec<&str> = top.iter().map(|e| e.search_term.as_str()).collect();
    // Most recently updated first, then term order for a full tie.
    assert_eq!(terms, vec!["dune", "alien", "matrix"]);
}

#[tokio::test]
async fn test_record_failure_is_swallowed() {
    let backend = Arc::new(InMemoryBackend::default());
    backend.fail.store(true, Ordering::SeqCst);
    let tally = TrendTally::new(backend.clone());

    // Must not panic or propagate; the store just stays empty.
    tally.record("dune", &movie(42, None)).await;
    backend.fail.store(false, Ordering::SeqCst);
    assert!(backend.entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_top_trending_failure_returns_empty_list() {
    let backend = Arc::new(InMemoryBackend::default());
    backend.seed(vec![entry(
        "dune",
        5,
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
    )]);
    backend.fail.store(true, Ordering::SeqCst);
    let tally = TrendTally::new(backend);

    assert!(tally.top_trending(5).await.is_empty());
}
