//! Command line argument definitions.

use clap::{Parser, Subcommand};

/// Movie Finder - Find movies you'll enjoy without the hassle
#[derive(Parser, Debug)]
#[command(name = "movie-finder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for movies, or list popular ones when no query is given
    Search {
        /// Search query (discover mode when omitted)
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Output format: table, simple, json
        #[arg(long, default_value = "table")]
        format: String,

        /// Do not record this search in the trending tally
        #[arg(long)]
        no_tally: bool,
    },

    /// Show the most searched-for movies
    Trending {
        /// Maximum number of entries
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },

    /// Interactive search with live results
    Live,
}
