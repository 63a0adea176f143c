use clap::{Parser, Subcommand};

/// CLI arguments for nomadb-cli
#[derive(Debug, Parser)]
#[command(
    name = "nomadb",
    version,
    about = "CLI for browsing and filtering the nomadb city directory"
)]
pub struct CliArgs {
    /// Path to the input dataset (default: the bundled cities.json)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the directory contents
    Stats,

    /// List cities, filtered and ordered by popularity
    List {
        /// Budget band: low, mid or high
        #[arg(long)]
        budget: Option<String>,

        /// Region id, repeatable; "all" means no constraint
        /// (capital, gangwon, chungcheong, gyeongsang, jeolla, jeju)
        #[arg(long = "region")]
        regions: Vec<String>,

        /// Environment tag, repeatable; any overlap matches
        /// (nature, urban, cafe_work, coworking)
        #[arg(long = "env")]
        environments: Vec<String>,

        /// Best-visit season: spring, summer, autumn or winter
        #[arg(long)]
        season: Option<String>,

        /// Substring match against either display name
        #[arg(long)]
        query: Option<String>,
    },

    /// Show a city's full detail page by slug
    City {
        /// URL slug (e.g. seoul, jeju-city)
        slug: String,
    },

    /// Search cities by name across both locales
    Search {
        /// Substring to search (case-insensitive)
        query: String,
    },

    /// List reviews for a city by slug
    Reviews {
        /// URL slug of the city
        slug: String,

        /// Page size
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Page offset
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
}
