//! Engine response shapes and their mapping to domain values.
//!
//! Only this module knows how hits, suggestion channels and aggregation
//! buckets look on the wire.

use crate::domain::model::{Document, PopularityRank};
use crate::utils::error::{Result, SearchError};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Option<HitsEnvelope>,
    #[serde(default)]
    pub suggest: Option<BTreeMap<String, Vec<SuggestEntry>>>,
    #[serde(default)]
    pub aggregations: Option<HashMap<String, AggregationResult>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HitsEnvelope {
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestEntry {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub options: Vec<SuggestOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestOption {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(flatten)]
    pub hit: RawHit,
}

#[derive(Debug, Default, Deserialize)]
pub struct AggregationResult {
    #[serde(default)]
    pub buckets: Vec<RawBucket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBucket {
    pub key: Value,
    #[serde(default)]
    pub key_as_string: Option<String>,
    pub doc_count: u64,
}

impl SearchResponse {
    pub fn hits(&self) -> &[RawHit] {
        self.hits.as_ref().map(|h| h.hits.as_slice()).unwrap_or(&[])
    }

    /// 攤平所有 suggestion channel 與 entry 的 option；channel 依名稱排序，channel 內保留引擎排序
    pub fn suggestion_options(&self) -> impl Iterator<Item = &SuggestOption> {
        self.suggest
            .iter()
            .flat_map(|channels| channels.values())
            .flatten()
            .flat_map(|entry| entry.options.iter())
    }

    /// `None` when the response carries no aggregation with that name.
    pub fn buckets(&self, aggregation_name: &str) -> Option<&[RawBucket]> {
        self.aggregations
            .as_ref()?
            .get(aggregation_name)
            .map(|agg| agg.buckets.as_slice())
    }
}

/// 回應外層無法解析時視為引擎錯誤
pub fn parse_envelope(raw: Value) -> Result<SearchResponse> {
    if !raw.is_object() {
        return Err(SearchError::engine_unavailable(format!(
            "malformed response envelope: expected an object, got {}",
            kind_of(&raw)
        )));
    }
    serde_json::from_value(raw).map_err(|e| {
        SearchError::engine_unavailable(format!("malformed response envelope: {}", e))
    })
}

/// A hit whose source is missing or does not deserialize is dropped, so one
/// bad document cannot fail a whole page.
pub fn map_hit<T: Document>(hit: &RawHit) -> Option<T> {
    let source = match &hit.source {
        Some(source) => source,
        None => {
            tracing::debug!("Dropping hit {:?} without a source document", hit.id);
            return None;
        }
    };

    match T::deserialize(source) {
        Ok(mut document) => {
            if let Some(id) = &hit.id {
                document.set_id(id.clone());
            }
            Some(document)
        }
        Err(e) => {
            tracing::debug!("Dropping hit {:?} with undeserializable source: {}", hit.id, e);
            None
        }
    }
}

pub fn map_hits<T: Document>(hits: &[RawHit]) -> Vec<T> {
    hits.iter().filter_map(map_hit::<T>).collect()
}

pub fn map_bucket(bucket: &RawBucket) -> PopularityRank {
    let query = match (&bucket.key_as_string, &bucket.key) {
        (Some(key), _) => key.clone(),
        (None, Value::String(key)) => key.clone(),
        (None, other) => other.to_string(),
    };
    PopularityRank {
        query,
        count: bucket.doc_count,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
