use crate::utils::error::{Result, SearchError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:9200";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search_log: SearchLogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: 10,
            username: None,
            password: None,
        }
    }
}

/// 一個參與全文檢索的欄位，weight 為 boost 倍數（未設定即為 1）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWeight {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
}

impl FieldWeight {
    pub fn new(name: impl Into<String>, weight: Option<f32>) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    pub fn boost(&self) -> f32 {
        self.weight.unwrap_or(1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub index: String,
    pub fields: Vec<FieldWeight>,
    pub suggestion_field: String,
    pub suggester_name: String,
}

impl CatalogConfig {
    pub fn default_fields() -> Vec<FieldWeight> {
        vec![
            FieldWeight::new("name", Some(3.0)),
            FieldWeight::new("description", None),
            FieldWeight::new("category", Some(2.0)),
            FieldWeight::new("synonyms", None),
        ]
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            index: "products".to_string(),
            fields: Self::default_fields(),
            suggestion_field: "suggestion".to_string(),
            suggester_name: "catalog-suggest".to_string(),
        }
    }
}

/// 同分時的排序方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Keep whatever order the engine returned equal counts in.
    #[default]
    Engine,
    /// Equal counts are ordered by query text, ascending.
    Alphabetical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLogConfig {
    pub index: String,
    pub query_field: String,
    pub timestamp_field: String,
    pub aggregation_name: String,
    pub tie_break: TieBreak,
}

impl Default for SearchLogConfig {
    fn default() -> Self {
        Self {
            index: "search_logs".to_string(),
            query_field: "query".to_string(),
            timestamp_field: "timestamp".to_string(),
            aggregation_name: "popular_queries".to_string(),
            tie_break: TieBreak::Engine,
        }
    }
}

impl SearchConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SearchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SearchError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ES_PASSWORD})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SearchError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.engine.endpoint = endpoint.into();
        self
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("engine.endpoint", &self.engine.endpoint)?;
        validation::validate_positive_number("engine.timeout_seconds", self.engine.timeout_seconds, 1)?;
        if self.engine.username.is_some() {
            validation::validate_required_field("engine.password", &self.engine.password)?;
        }

        validation::validate_index_name("catalog.index", &self.catalog.index)?;
        if self.catalog.fields.is_empty() {
            return Err(SearchError::MissingConfigError {
                field: "catalog.fields".to_string(),
            });
        }
        for field in &self.catalog.fields {
            validation::validate_non_empty_string("catalog.fields.name", &field.name)?;
            if let Some(weight) = field.weight {
                validation::validate_boost(&format!("catalog.fields.{}", field.name), weight)?;
            }
        }
        validation::validate_non_empty_string("catalog.suggestion_field", &self.catalog.suggestion_field)?;
        validation::validate_non_empty_string("catalog.suggester_name", &self.catalog.suggester_name)?;

        validation::validate_index_name("search_log.index", &self.search_log.index)?;
        validation::validate_non_empty_string("search_log.query_field", &self.search_log.query_field)?;
        validation::validate_non_empty_string(
            "search_log.timestamp_field",
            &self.search_log.timestamp_field,
        )?;
        validation::validate_non_empty_string(
            "search_log.aggregation_name",
            &self.search_log.aggregation_name,
        )?;

        Ok(())
    }
}

impl Validate for SearchConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
