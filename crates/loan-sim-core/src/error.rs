use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanSimError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanSimError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        LoanSimError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        LoanSimError::ArithmeticOverflow {
            context: context.into(),
        }
    }
}

impl From<serde_json::Error> for LoanSimError {
    fn from(e: serde_json::Error) -> Self {
        LoanSimError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for LoanSimError {
    fn from(e: serde_yaml::Error) -> Self {
        LoanSimError::SerializationError(e.to_string())
    }
}
