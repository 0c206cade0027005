use crate::config::SearchConfig;
use crate::core::popularity::PopularityAggregator;
use crate::core::query_builder::QueryBuilder;
use crate::core::request::EngineRequest;
use crate::core::result_mapper::{map_hits, parse_envelope, SearchResponse};
use crate::core::suggestion::SuggestionEngine;
use crate::core::EngineTransport;
use crate::domain::model::{CatalogItem, PopularityRank};
use crate::domain::window::TimeWindow;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

pub const DEFAULT_POPULAR_SIZE: usize = 10;

/// Search, autocomplete and popular-query lookups over one engine
/// transport. Holds no per-request state; share it behind an `Arc`.
pub struct SearchGateway<T: EngineTransport> {
    transport: T,
    catalog_index: String,
    search_log_index: String,
    query_builder: QueryBuilder,
    suggestions: SuggestionEngine,
    popularity: PopularityAggregator,
    clock: fn() -> DateTime<Utc>,
}

impl<T: EngineTransport> SearchGateway<T> {
    pub fn new(transport: T, config: &SearchConfig) -> Self {
        Self {
            transport,
            catalog_index: config.catalog.index.clone(),
            search_log_index: config.search_log.index.clone(),
            query_builder: QueryBuilder::new(config.catalog.fields.clone()),
            suggestions: SuggestionEngine::from_config(&config.catalog),
            popularity: PopularityAggregator::from_config(&config.search_log),
            clock: Utc::now,
        }
    }

    /// Replaces the wall clock used to anchor relative windows.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// At most `size` items in the engine's relevance order.
    pub async fn search(&self, query: &str, size: usize) -> Result<Vec<CatalogItem>> {
        let request = self.query_builder.build_search_request(query, size)?;
        tracing::debug!("Searching '{}' in {} (size {})", query, self.catalog_index, size);

        let response = self.execute(&self.catalog_index, &request).await?;
        let mut items: Vec<CatalogItem> = map_hits(response.hits());
        items.truncate(size);

        tracing::debug!("Search '{}' returned {} items", query, items.len());
        Ok(items)
    }

    /// Up to `size` distinct items whose suggestion terms complete `prefix`.
    pub async fn autocomplete(&self, prefix: &str, size: usize) -> Result<Vec<CatalogItem>> {
        let request = self.suggestions.build_prefix_request(prefix, size)?;
        if size == 0 {
            return Ok(Vec::new());
        }
        tracing::debug!("Autocompleting '{}' in {} (size {})", prefix, self.catalog_index, size);

        let response = self.execute(&self.catalog_index, &request).await?;
        let items = self.suggestions.parse_suggestions(&response, size);

        tracing::debug!("Autocomplete '{}' returned {} items", prefix, items.len());
        Ok(items)
    }

    /// Most frequent queries within the last `duration` (e.g. `5m`, `1h`).
    pub async fn popular_searches(&self, duration: &str, size: usize) -> Result<Vec<PopularityRank>> {
        let window = TimeWindow::last(duration)?;
        self.popular_in(&window, size).await
    }

    /// Most frequent queries within `[from, to)`; each boundary is resolved
    /// on its own and `from` must come strictly before `to`.
    pub async fn popular_searches_between(
        &self,
        from: &str,
        to: &str,
        size: usize,
    ) -> Result<Vec<PopularityRank>> {
        let window = TimeWindow::between(from, to)?;
        self.popular_in(&window, size).await
    }

    pub async fn popular_in(&self, window: &TimeWindow, size: usize) -> Result<Vec<PopularityRank>> {
        let now = (self.clock)();
        if size == 0 {
            window.resolve(now)?;
            return Ok(Vec::new());
        }

        let request = self.popularity.build_popularity_request(window, size, now)?;
        tracing::debug!("Aggregating popular queries in {} for {:?}", self.search_log_index, window);

        let response = self.execute(&self.search_log_index, &request).await?;
        let ranks = self.popularity.parse_buckets(&response);

        tracing::debug!("Popular query lookup returned {} ranks", ranks.len());
        Ok(ranks)
    }

    async fn execute(&self, index: &str, request: &EngineRequest) -> Result<SearchResponse> {
        let raw = self.transport.search(index, &request.to_body()).await?;
        parse_envelope(raw)
    }
}
