//! Error types and exit codes for pathlab
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, bad configuration values)
//! - 3: Data error (missing or malformed dataset, invalid graph arrays)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the pathlab binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args/config values (2)
    Usage = 2,
    /// Data error - missing or malformed dataset (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while building graphs or running experiments
#[derive(Error, Debug)]
pub enum PathlabError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("unsupported {context}: {value} (supported: {supported})")]
    Unsupported {
        context: String,
        value: String,
        supported: String,
    },

    // Data errors (exit code 3)
    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("invalid graph: {reason}")]
    InvalidGraph { reason: String },

    #[error("{path:?}:{line}: {reason}")]
    DatasetParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),

    #[error("experiment interrupted; rows written so far were kept")]
    Interrupted,
}

impl PathlabError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        PathlabError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        PathlabError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        PathlabError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an unsupported value
    pub fn unsupported(
        context: &str,
        value: impl std::fmt::Display,
        supported: impl std::fmt::Display,
    ) -> Self {
        PathlabError::Unsupported {
            context: context.to_string(),
            value: value.to_string(),
            supported: supported.to_string(),
        }
    }

    /// Create an error for malformed graph arrays
    pub fn invalid_graph(reason: impl Into<String>) -> Self {
        PathlabError::InvalidGraph {
            reason: reason.into(),
        }
    }

    /// Create an error for a malformed dataset line
    pub fn dataset_parse(
        path: impl Into<PathBuf>,
        line: usize,
        reason: impl std::fmt::Display,
    ) -> Self {
        PathlabError::DatasetParse {
            path: path.into(),
            line,
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            PathlabError::UsageError(_)
            | PathlabError::InvalidValue { .. }
            | PathlabError::Unsupported { .. } => ExitCode::Usage,

            PathlabError::NotFound { .. }
            | PathlabError::InvalidGraph { .. }
            | PathlabError::DatasetParse { .. } => ExitCode::Data,

            PathlabError::Io(_)
            | PathlabError::Yaml(_)
            | PathlabError::Json(_)
            | PathlabError::Toml(_)
            | PathlabError::FailedOperationWithTarget { .. }
            | PathlabError::Other(_)
            | PathlabError::Interrupted => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            PathlabError::UsageError(_) => "usage_error",
            PathlabError::InvalidValue { .. } => "invalid_value",
            PathlabError::Unsupported { .. } => "unsupported",
            PathlabError::NotFound { .. } => "not_found",
            PathlabError::InvalidGraph { .. } => "invalid_graph",
            PathlabError::DatasetParse { .. } => "dataset_parse",
            PathlabError::Io(_) => "io_error",
            PathlabError::Yaml(_) => "yaml_error",
            PathlabError::Json(_) => "json_error",
            PathlabError::Toml(_) => "toml_error",
            PathlabError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            PathlabError::Other(_) => "other",
            PathlabError::Interrupted => "interrupted",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for pathlab operations
pub type Result<T> = std::result::Result<T, PathlabError>;
