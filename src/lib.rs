pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use adapters::HttpEngineClient;
pub use config::SearchConfig;
pub use crate::core::{gateway::SearchGateway, repository::DocumentRepository};
pub use domain::model::{CatalogItem, PopularityRank, QueryLogEntry};
pub use domain::window::TimeWindow;
pub use utils::error::{Result, SearchError};
