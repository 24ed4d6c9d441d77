//! Trending command implementation.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use crate::models::config::Config;
use crate::models::trending::TrendEntry;
use crate::services::tally::{AppwriteBackend, TrendTally};

/// Execute trending command.
pub async fn execute_trending(config: &Config, limit: usize) -> Result<()> {
    let backend = match AppwriteBackend::new(&config.tally) {
        Ok(backend) => backend,
        Err(_) => {
            println!(
                "{}",
                "Trend store is not configured. Set the APPWRITE_* environment variables.".yellow()
            );
            return Ok(());
        }
    };

    let tally = TrendTally::new(Arc::new(backend));
    let entries = tally.top_trending(limit).await;

    print_trending(&entries);
    Ok(())
}

/// Print the trending panel.
pub fn print_trending(entries: &[TrendEntry]) {
    if entries.is_empty() {
        println!("No trending searches yet.");
        return;
    }

    println!("{}", "Trending searches:".bold().cyan());
    for (i, entry) in entries.iter().enumerate() {
        let searches = if entry.count == 1 { "search" } else { "searches" };
        println!(
            " {:>2}. {} {}",
            i + 1,
            entry.search_term.bold(),
            format!("({} {})", entry.count, searches).dimmed(),
        );
    }
}
