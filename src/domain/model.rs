use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 可存入搜尋引擎的文件，id 由引擎在第一次儲存時指派
pub trait Document: Serialize + serde::de::DeserializeOwned + Send + Sync {
    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(
        rename = "suggestion",
        default,
        serialize_with = "completion::serialize",
        deserialize_with = "completion::deserialize"
    )]
    pub suggestion_terms: Vec<String>,
    #[serde(skip)]
    pub id: Option<String>,
}

impl CatalogItem {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        suggestion_terms: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
            suggestion_terms,
            id: None,
        }
    }
}

impl Document for CatalogItem {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryLogEntry {
    pub query: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub result_count: u64,
    #[serde(skip)]
    pub id: Option<String>,
}

impl QueryLogEntry {
    pub fn new(query: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            query: query.into(),
            timestamp,
            user_id: None,
            result_count: 0,
            id: None,
        }
    }
}

impl Document for QueryLogEntry {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularityRank {
    pub query: String,
    pub count: u64,
}

impl PopularityRank {
    pub fn new(query: impl Into<String>, count: u64) -> Self {
        Self {
            query: query.into(),
            count,
        }
    }
}

/// completion 欄位在引擎中存成 `{"input": [...]}`，讀取時也接受純陣列或單一字串
mod completion {
    use super::*;

    #[derive(Serialize)]
    struct CompletionOut<'a> {
        input: &'a [String],
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CompletionIn {
        Object { input: Inputs },
        Bare(Inputs),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Inputs {
        Many(Vec<String>),
        One(String),
    }

    pub fn serialize<S: Serializer>(terms: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        CompletionOut { input: terms }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let inputs = match CompletionIn::deserialize(deserializer)? {
            CompletionIn::Object { input } | CompletionIn::Bare(input) => input,
        };
        Ok(match inputs {
            Inputs::Many(terms) => terms,
            Inputs::One(term) => vec![term],
        })
    }
}
