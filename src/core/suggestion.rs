use crate::config::CatalogConfig;
use crate::core::request::{CompletionSuggest, EngineRequest};
use crate::core::result_mapper::{map_hit, SearchResponse};
use crate::domain::model::CatalogItem;
use crate::utils::error::Result;
use crate::utils::validation::require_non_empty;
use std::collections::HashSet;

/// Prefix completion over the catalog's completion field.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    suggester_name: String,
    field: String,
}

impl SuggestionEngine {
    pub fn new(suggester_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            suggester_name: suggester_name.into(),
            field: field.into(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(&config.suggester_name, &config.suggestion_field)
    }

    /// 只要 suggestion，不需要 hits
    pub fn build_prefix_request(&self, prefix: &str, max_results: usize) -> Result<EngineRequest> {
        let prefix = require_non_empty("prefix", prefix)?;

        Ok(EngineRequest {
            size: 0,
            query: None,
            suggest: Some(CompletionSuggest {
                name: self.suggester_name.clone(),
                prefix: prefix.to_string(),
                field: self.field.clone(),
                size: max_results,
                skip_duplicates: true,
            }),
            aggregation: None,
        })
    }

    /// Flattens every suggestion channel in engine order, dropping options
    /// without a usable source or id and keeping the first option per item.
    ///
    /// `skip_duplicates` on the request only collapses identical suggestion
    /// texts; one item with several overlapping inputs can still come back
    /// once per input, so identity dedup happens here as well.
    pub fn parse_suggestions(&self, response: &SearchResponse, max_results: usize) -> Vec<CatalogItem> {
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for option in response.suggestion_options() {
            if items.len() >= max_results {
                break;
            }
            let Some(id) = option.hit.id.as_deref() else {
                tracing::debug!("Dropping suggestion {:?} without a document id", option.text);
                continue;
            };
            if seen.contains(id) {
                continue;
            }
            if let Some(item) = map_hit::<CatalogItem>(&option.hit) {
                seen.insert(id.to_string());
                items.push(item);
            }
        }

        items
    }
}
