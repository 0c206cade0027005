use crate::config::SearchConfig;
use crate::core::gateway::DEFAULT_POPULAR_SIZE;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "catalog-search")]
#[command(about = "Catalog search, autocomplete and popular-query lookups against a search engine")]
pub struct CliArgs {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the engine endpoint from the configuration
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Weighted full-text search over the catalog
    Search {
        query: String,
        #[arg(long, default_value_t = 10)]
        size: usize,
    },
    /// Prefix completion over catalog suggestion terms
    Autocomplete {
        prefix: String,
        #[arg(long, default_value_t = 10)]
        size: usize,
    },
    /// Most frequent queries within the last duration (e.g. 5m, 1h, 1d, 1w)
    Popular {
        #[arg(long, default_value = "1h")]
        duration: String,
        #[arg(long, default_value_t = DEFAULT_POPULAR_SIZE)]
        size: usize,
    },
    /// Most frequent queries within [from, to)
    PopularBetween {
        from: String,
        to: String,
        #[arg(long, default_value_t = DEFAULT_POPULAR_SIZE)]
        size: usize,
    },
    /// Store a catalog item
    AddItem {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        category: String,
        /// Completion inputs, comma separated
        #[arg(long = "suggest", value_delimiter = ',')]
        suggestion_terms: Vec<String>,
    },
    /// Record a query log entry timestamped now
    LogQuery {
        query: String,
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long, default_value_t = 0)]
        result_count: u64,
    },
}

impl CliArgs {
    pub fn load_config(&self) -> Result<SearchConfig> {
        let config = match &self.config {
            Some(path) => SearchConfig::from_file(path)?,
            None => SearchConfig::default(),
        };

        Ok(match &self.endpoint {
            Some(endpoint) => config.with_endpoint(endpoint.clone()),
            None => config,
        })
    }
}
