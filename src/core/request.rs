use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineQuery {
    /// `fields` are already rendered with their boost, e.g. `name^3`.
    MultiMatch { query: String, fields: Vec<String> },
    /// Half-open `[gte, lt)` range over a date field.
    Range {
        field: String,
        gte: DateTime<Utc>,
        lt: DateTime<Utc>,
    },
}

impl EngineQuery {
    pub fn to_json(&self) -> Value {
        match self {
            EngineQuery::MultiMatch { query, fields } => json!({
                "multi_match": {
                    "query": query,
                    "fields": fields,
                }
            }),
            EngineQuery::Range { field, gte, lt } => {
                let mut range = Map::new();
                range.insert(
                    field.clone(),
                    json!({
                        "gte": gte.to_rfc3339_opts(SecondsFormat::Millis, true),
                        "lt": lt.to_rfc3339_opts(SecondsFormat::Millis, true),
                    }),
                );
                json!({ "range": range })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSuggest {
    pub name: String,
    pub prefix: String,
    pub field: String,
    pub size: usize,
    pub skip_duplicates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketOrder {
    CountDesc,
    KeyAsc,
}

impl BucketOrder {
    fn to_json(self) -> Value {
        match self {
            BucketOrder::CountDesc => json!({ "_count": "desc" }),
            BucketOrder::KeyAsc => json!({ "_key": "asc" }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermsAggregation {
    pub name: String,
    pub field: String,
    pub size: usize,
    /// Empty means the engine's default bucket order.
    pub order: Vec<BucketOrder>,
}

/// 一次 `_search` 請求的內容；size 為回傳的 hit 數
#[derive(Debug, Clone, PartialEq)]
pub struct EngineRequest {
    pub size: usize,
    pub query: Option<EngineQuery>,
    pub suggest: Option<CompletionSuggest>,
    pub aggregation: Option<TermsAggregation>,
}

impl EngineRequest {
    pub fn hits(query: EngineQuery, size: usize) -> Self {
        Self {
            size,
            query: Some(query),
            suggest: None,
            aggregation: None,
        }
    }

    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("size".to_string(), json!(self.size));

        if let Some(query) = &self.query {
            body.insert("query".to_string(), query.to_json());
        }

        if let Some(suggest) = &self.suggest {
            let mut suggesters = Map::new();
            suggesters.insert(
                suggest.name.clone(),
                json!({
                    "prefix": suggest.prefix,
                    "completion": {
                        "field": suggest.field,
                        "size": suggest.size,
                        "skip_duplicates": suggest.skip_duplicates,
                    }
                }),
            );
            body.insert("suggest".to_string(), Value::Object(suggesters));
        }

        if let Some(aggregation) = &self.aggregation {
            let mut terms = Map::new();
            terms.insert("field".to_string(), json!(aggregation.field));
            terms.insert("size".to_string(), json!(aggregation.size));
            if !aggregation.order.is_empty() {
                let order: Vec<Value> = aggregation.order.iter().map(|o| o.to_json()).collect();
                terms.insert("order".to_string(), Value::Array(order));
            }

            let mut aggs = Map::new();
            aggs.insert(aggregation.name.clone(), json!({ "terms": terms }));
            body.insert("aggs".to_string(), Value::Object(aggs));
        }

        Value::Object(body)
    }
}
