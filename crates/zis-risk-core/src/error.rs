use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZisRiskError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate risk id: {0}")]
    DuplicateId(String),

    #[error("API Error: {status} {status_text}")]
    Api { status: u16, status_text: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Suggestion(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ZisRiskError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        ZisRiskError::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for ZisRiskError {
    fn from(e: serde_json::Error) -> Self {
        ZisRiskError::SerializationError(e.to_string())
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ZisRiskError {
    fn from(e: reqwest::Error) -> Self {
        ZisRiskError::Transport(e.to_string())
    }
}
