use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Search engine unavailable: {message}")]
    EngineUnavailable { message: String },

    #[error("Engine request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidArgument,
    EngineUnavailable,
    Configuration,
    Internal,
}

impl SearchError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn engine_unavailable(message: impl Into<String>) -> Self {
        Self::EngineUnavailable {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } => ErrorCategory::InvalidArgument,
            Self::EngineUnavailable { .. } | Self::Transport(_) => ErrorCategory::EngineUnavailable,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::InvalidArgument => "Check the query text, size and time window arguments",
            ErrorCategory::EngineUnavailable => {
                "Make sure the search engine is running and the endpoint is reachable"
            }
            ErrorCategory::Configuration => "Review the configuration file and environment variables",
            ErrorCategory::Internal => "Re-run with --verbose and inspect the logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_class_errors_share_category() {
        let err = SearchError::engine_unavailable("status 503");
        assert_eq!(err.category(), ErrorCategory::EngineUnavailable);
        assert!(err.to_string().contains("status 503"));
    }

    #[test]
    fn test_config_errors_are_configuration_category() {
        let err = SearchError::MissingConfigError {
            field: "engine.endpoint".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);

        let err = SearchError::invalid_argument("prefix cannot be empty");
        assert_eq!(err.category(), ErrorCategory::InvalidArgument);
    }
}
