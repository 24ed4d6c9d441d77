//! Live command implementation: interactive search with debounced input.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::trending::print_trending;
use crate::core::debounce::Debouncer;
use crate::core::session::{SearchOutcome, SearchSession};
use crate::models::config::Config;
use crate::models::movie::Movie;
use crate::services::tally::{AppwriteBackend, TrendTally};
use crate::services::tmdb::{MovieCatalog, TmdbClient, TmdbConfig};

/// How many results the live view shows per query.
const MAX_VISIBLE_RESULTS: usize = 10;

/// Execute live command: every line typed is debounced into a search, an
/// empty line goes back to popular movies, Ctrl-D quits.
pub async fn execute_live(config: &Config) -> Result<()> {
    let mut tmdb_config = TmdbConfig::from_settings(&config.tmdb)?;
    tmdb_config.timeout = Duration::from_secs(config.search.timeout_secs);
    let catalog: Arc<dyn MovieCatalog> = Arc::new(TmdbClient::new(tmdb_config));

    let tally = match AppwriteBackend::new(&config.tally) {
        Ok(backend) => Some(Arc::new(TrendTally::new(Arc::new(backend)))),
        Err(err) => {
            tracing::debug!("trending panel disabled: {err}");
            None
        }
    };

    let session = SearchSession::new(catalog, tally.clone());
    let mut outcomes = session.subscribe();

    let (debouncer, mut settled) =
        Debouncer::new(Duration::from_millis(config.search.debounce_ms));

    println!(
        "{}",
        "Type to search, empty line for popular movies, Ctrl-D to quit.".bold()
    );

    if let Some(tally) = &tally {
        print_trending(&tally.top_trending(config.search.trending_limit).await);
        println!();
    }

    // The view opens on popular movies, like an untouched search box.
    debouncer.update("");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut spinner: Option<ProgressBar> = None;
    let mut last_query = String::new();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => debouncer.update(line.trim().to_string()),
                None => break,
            },
            term = settled.recv() => match term {
                Some(term) => {
                    last_query = term.clone();
                    session.submit(&term);
                }
                None => break,
            },
            changed = outcomes.changed() => {
                if changed.is_err() {
                    break;
                }
                let outcome = outcomes.borrow_and_update().clone();
                if let Some(bar) = spinner.take() {
                    bar.finish_and_clear();
                }

                match outcome {
                    SearchOutcome::Loading => {
                        spinner = Some(start_spinner(&last_query));
                    }
                    SearchOutcome::Success(movies) => {
                        print_results(&last_query, &movies);
                        if !last_query.is_empty() {
                            if let Some(tally) = &tally {
                                print_trending(
                                    &tally.top_trending(config.search.trending_limit).await,
                                );
                            }
                        }
                        println!();
                    }
                    SearchOutcome::Error(message) => {
                        println!("{}", message.red());
                        println!();
                    }
                    SearchOutcome::Idle => {}
                }
            }
        }
    }

    session.shutdown();
    Ok(())
}

fn start_spinner(query: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::default_spinner());
    bar.set_message(if query.is_empty() {
        "Loading popular movies...".to_string()
    } else {
        format!("Searching for \"{}\"...", query)
    });
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn print_results(query: &str, movies: &[Movie]) {
    if movies.is_empty() {
        println!("{}", "No results found.".yellow());
        return;
    }

    let heading = if query.is_empty() {
        "Popular movies:".to_string()
    } else {
        format!("Results for \"{}\":", query)
    };
    println!("{}", heading.bold().cyan());

    for movie in movies.iter().take(MAX_VISIBLE_RESULTS) {
        println!(
            "  {} ({}) {}",
            movie.title,
            movie.year().unwrap_or("????"),
            movie
                .vote_average
                .map(|v| format!("{:.1}", v))
                .unwrap_or_default()
                .dimmed(),
        );
    }
    if movies.len() > MAX_VISIBLE_RESULTS {
        println!("  {}", format!("...and {} more", movies.len() - MAX_VISIBLE_RESULTS).dimmed());
    }
}
