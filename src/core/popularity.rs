use crate::config::{SearchLogConfig, TieBreak};
use crate::core::request::{BucketOrder, EngineQuery, EngineRequest, TermsAggregation};
use crate::core::result_mapper::{map_bucket, SearchResponse};
use crate::domain::model::PopularityRank;
use crate::domain::window::TimeWindow;
use crate::utils::error::{Result, SearchError};
use chrono::{DateTime, Utc};

/// 以時間區間統計最常出現的查詢字串
#[derive(Debug, Clone)]
pub struct PopularityAggregator {
    aggregation_name: String,
    query_field: String,
    timestamp_field: String,
    tie_break: TieBreak,
}

impl PopularityAggregator {
    pub fn from_config(config: &SearchLogConfig) -> Self {
        Self {
            aggregation_name: config.aggregation_name.clone(),
            query_field: config.query_field.clone(),
            timestamp_field: config.timestamp_field.clone(),
            tie_break: config.tie_break,
        }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// The window is resolved against `now` here, so the request only ever
    /// carries absolute instants.
    pub fn build_popularity_request(
        &self,
        window: &TimeWindow,
        top_n: usize,
        now: DateTime<Utc>,
    ) -> Result<EngineRequest> {
        if top_n == 0 {
            return Err(SearchError::invalid_argument(
                "number of popular queries must be at least 1",
            ));
        }
        let resolved = window.resolve(now)?;

        let order = match self.tie_break {
            TieBreak::Engine => vec![],
            TieBreak::Alphabetical => vec![BucketOrder::CountDesc, BucketOrder::KeyAsc],
        };

        Ok(EngineRequest {
            size: 0,
            query: Some(EngineQuery::Range {
                field: self.timestamp_field.clone(),
                gte: resolved.from,
                lt: resolved.to,
            }),
            suggest: None,
            aggregation: Some(TermsAggregation {
                name: self.aggregation_name.clone(),
                field: self.query_field.clone(),
                size: top_n,
                order,
            }),
        })
    }

    /// Every bucket becomes one rank. Sorting is stable on `count`
    /// descending, so ties keep the engine's order unless the alphabetical
    /// tie-break is configured.
    pub fn parse_buckets(&self, response: &SearchResponse) -> Vec<PopularityRank> {
        let Some(buckets) = response.buckets(&self.aggregation_name) else {
            return Vec::new();
        };

        let mut ranks: Vec<PopularityRank> = buckets.iter().map(map_bucket).collect();
        match self.tie_break {
            TieBreak::Engine => ranks.sort_by(|a, b| b.count.cmp(&a.count)),
            TieBreak::Alphabetical => {
                ranks.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.query.cmp(&b.query)))
            }
        }
        ranks
    }
}
