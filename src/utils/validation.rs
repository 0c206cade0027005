use crate::utils::error::{Result, SearchError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SearchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SearchError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SearchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(SearchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| SearchError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SearchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 索引名稱規則：小寫、不可含路徑或萬用字元
pub fn validate_index_name(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    let forbidden = ['/', '\\', '*', '?', '"', '<', '>', '|', ' ', ',', '#'];
    if value.chars().any(|c| forbidden.contains(&c) || c.is_uppercase())
        || value.starts_with(['-', '_', '+'])
    {
        return Err(SearchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Index names must be lowercase and free of path or wildcard characters"
                .to_string(),
        });
    }
    Ok(())
}

pub fn validate_boost(field_name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SearchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Boost must be a finite number greater than 0".to_string(),
        });
    }
    Ok(())
}

/// 呼叫端參數檢查，錯誤屬於 InvalidArgument 而非設定錯誤
pub fn require_non_empty<'a>(argument: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SearchError::invalid_argument(format!(
            "{} cannot be empty",
            argument
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("engine.endpoint", "https://example.com:9200").is_ok());
        assert!(validate_url("engine.endpoint", "http://localhost:9200").is_ok());
        assert!(validate_url("engine.endpoint", "").is_err());
        assert!(validate_url("engine.endpoint", "invalid-url").is_err());
        assert!(validate_url("engine.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("engine.timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("engine.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_index_name() {
        assert!(validate_index_name("catalog.index", "products").is_ok());
        assert!(validate_index_name("catalog.index", "search_logs").is_ok());
        assert!(validate_index_name("catalog.index", "Products").is_err());
        assert!(validate_index_name("catalog.index", "logs/*").is_err());
        assert!(validate_index_name("catalog.index", "_hidden").is_err());
        assert!(validate_index_name("catalog.index", "  ").is_err());
    }

    #[test]
    fn test_validate_boost() {
        assert!(validate_boost("catalog.fields.name", 3.0).is_ok());
        assert!(validate_boost("catalog.fields.name", 0.0).is_err());
        assert!(validate_boost("catalog.fields.name", -1.0).is_err());
        assert!(validate_boost("catalog.fields.name", f32::NAN).is_err());
    }

    #[test]
    fn test_require_non_empty_trims_and_rejects_blank() {
        assert_eq!(require_non_empty("query", "  gpu ").unwrap(), "gpu");
        let err = require_non_empty("prefix", "   ").unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument { .. }));
    }
}
