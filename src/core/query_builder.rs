use crate::config::FieldWeight;
use crate::core::request::{EngineQuery, EngineRequest};
use crate::utils::error::{Result, SearchError};
use crate::utils::validation::require_non_empty;

/// 加權多欄位全文檢索
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    fields: Vec<FieldWeight>,
}

impl QueryBuilder {
    pub fn new(fields: Vec<FieldWeight>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldWeight] {
        &self.fields
    }

    pub fn build_full_text_query(&self, text: &str) -> Result<EngineQuery> {
        build_full_text_query(text, &self.fields)
    }

    /// `size == 0` asks the engine for a count only.
    pub fn build_search_request(&self, text: &str, size: usize) -> Result<EngineRequest> {
        Ok(EngineRequest::hits(self.build_full_text_query(text)?, size))
    }
}

pub fn build_full_text_query(text: &str, field_weights: &[FieldWeight]) -> Result<EngineQuery> {
    let text = require_non_empty("query text", text)?;
    if field_weights.is_empty() {
        return Err(SearchError::invalid_argument(
            "at least one search field is required",
        ));
    }

    let fields = field_weights.iter().map(render_field).collect();
    Ok(EngineQuery::MultiMatch {
        query: text.to_string(),
        fields,
    })
}

fn render_field(field: &FieldWeight) -> String {
    let boost = field.boost();
    if boost == 1.0 {
        field.name.clone()
    } else {
        format!("{}^{}", field.name, boost)
    }
}
