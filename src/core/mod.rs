pub mod gateway;
pub mod popularity;
pub mod query_builder;
pub mod repository;
pub mod request;
pub mod result_mapper;
pub mod suggestion;

pub use crate::domain::model::{CatalogItem, Document, PopularityRank, QueryLogEntry};
pub use crate::domain::ports::{DocumentStore, EngineTransport};
pub use crate::utils::error::Result;
