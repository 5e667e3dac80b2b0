use thiserror::Error;

#[derive(Error, Debug)]
pub enum HrError {
    #[error("Validation failed for {field} ('{value}'): {reason}")]
    ValidationFailure {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{kind} not found: {key}")]
    NotFound { kind: String, key: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

impl HrError {
    pub fn validation(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        HrError::ValidationFailure {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: &str, key: impl ToString) -> Self {
        HrError::NotFound {
            kind: kind.to_string(),
            key: key.to_string(),
        }
    }

    /// 驗證失敗時回傳失敗的欄位名稱
    pub fn failed_field(&self) -> Option<&str> {
        match self {
            HrError::ValidationFailure { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HrError::ValidationFailure { field, value, reason } => {
                format!("Invalid {}: '{}' ({})", field, value, reason)
            }
            HrError::NotFound { kind, key } => format!("No {} matches '{}'", kind, key),
            HrError::ConfigError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            HrError::IoError(e) => format!("File access failed: {}", e),
            HrError::SerializationError(e) => format!("Could not read or write JSON: {}", e),
            HrError::CsvError(e) => format!("Could not write CSV: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HrError::ValidationFailure { .. } => {
                "Check the value against the directory rules and submit it again"
            }
            HrError::NotFound { .. } => "Create the missing entry first or check the spelling",
            HrError::ConfigError { .. } => "Fix the configuration file and run again",
            HrError::IoError(_) => "Make sure the path exists and is writable",
            HrError::SerializationError(_) => "Make sure the input is valid JSON",
            HrError::CsvError(_) => "Make sure the output location is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, HrError>;
