//! Movie Finder CLI
//!
//! A command-line tool for searching and discovering movies via TMDB, with
//! an Appwrite-backed trending panel.

use clap::Parser;
use movie_finder::cli::{
    args::{Cli, Commands},
    commands::{live, search, trending},
};
use movie_finder::models::config::{load_config, Config};
use movie_finder::preflight;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = load_config();

    // Run preflight checks unless skipped
    if !cli.skip_preflight {
        run_preflight_checks(&config).await?;
    }

    // Run the appropriate command
    match cli.command {
        Commands::Search {
            query,
            format,
            no_tally,
        } => {
            search::execute_search(&config, query, format, no_tally).await?;
        }

        Commands::Trending { limit } => {
            trending::execute_trending(&config, limit).await?;
        }

        Commands::Live => {
            live::execute_live(&config).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("movie_finder=debug")
    } else {
        EnvFilter::new("movie_finder=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(config: &Config) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config).await?;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
