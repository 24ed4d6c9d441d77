//! Search command implementation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use tokio_util::sync::CancellationToken;

use crate::models::config::Config;
use crate::models::movie::Movie;
use crate::services::tally::{AppwriteBackend, TrendTally};
use crate::services::tmdb::{MovieCatalog, TmdbClient, TmdbConfig};

/// Execute search command. A missing or empty query lists popular movies
/// instead of searching.
pub async fn execute_search(
    config: &Config,
    query: Option<String>,
    format: String,
    no_tally: bool,
) -> Result<()> {
    let mut tmdb_config = TmdbConfig::from_settings(&config.tmdb)?;
    tmdb_config.timeout = Duration::from_secs(config.search.timeout_secs);
    let client = TmdbClient::new(tmdb_config);

    let query = query.unwrap_or_default();
    let cancel = CancellationToken::new();

    let result = if query.is_empty() {
        client.discover(&cancel).await
    } else {
        client.search(&query, &cancel).await
    };

    let movies = match result {
        Ok(movies) => movies,
        Err(err) => {
            println!("{}", err.user_message().red());
            return Ok(());
        }
    };

    if !no_tally && !query.is_empty() {
        if let Some(first) = movies.first() {
            match AppwriteBackend::new(&config.tally) {
                Ok(backend) => {
                    TrendTally::new(Arc::new(backend)).record(&query, first).await;
                }
                Err(err) => tracing::debug!("search tally skipped: {err}"),
            }
        }
    }

    match format.as_str() {
        "json" => print_json(&movies),
        "simple" => print_simple(&movies),
        _ => print_table(&movies, &query),
    }

    Ok(())
}

/// Print results as JSON.
fn print_json(movies: &[Movie]) {
    println!("{}", serde_json::to_string_pretty(movies).unwrap());
}

/// Print results in simple format.
fn print_simple(movies: &[Movie]) {
    if movies.is_empty() {
        println!("No results found.");
        return;
    }

    for movie in movies {
        println!(
            "{} ({}) - {}",
            movie.title,
            movie.year().unwrap_or("????"),
            movie
                .vote_average
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "?".to_string()),
        );
    }
}

/// Print results as table.
fn print_table(movies: &[Movie], query: &str) {
    if movies.is_empty() {
        println!("{}", "No results found.".yellow());
        return;
    }

    let heading = if query.is_empty() {
        format!("Popular movies ({}):", movies.len())
    } else {
        format!("Found {} results for \"{}\":", movies.len(), query)
    };
    println!("{}", heading.bold().cyan());
    println!();

    println!(
        " {:>4} | {:>4} | {:<40} | {:>6} | {}",
        "#", "Year", "Title", "Rating", "Lang"
    );
    println!("{}", "-".repeat(72));

    for (i, movie) in movies.iter().enumerate() {
        let title = if movie.title.chars().count() > 38 {
            format!("{}...", movie.title.chars().take(35).collect::<String>())
        } else {
            movie.title.clone()
        };

        println!(
            " {:>4} | {:>4} | {:<40} | {:>6} | {}",
            i + 1,
            movie.year().unwrap_or("????"),
            title,
            movie
                .vote_average
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "?".to_string()),
            movie.original_language.as_deref().unwrap_or("??"),
        );
    }
}
