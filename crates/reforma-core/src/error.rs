use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReformaError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown state code: '{0}' (no ICMS rate available)")]
    UnknownState(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ReformaError {
    fn from(e: serde_json::Error) -> Self {
        ReformaError::SerializationError(e.to_string())
    }
}
