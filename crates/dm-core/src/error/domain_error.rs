//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Message not found: {message_id} in chat {chat_id}")]
    MessageNotFound { chat_id: String, message_id: String },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Encoding Errors
    // =========================================================================
    /// A stored value violates its expected encoding (schema drift or corrupt data)
    #[error("Decode error: {0}")]
    DecodeError(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// The request was aborted by a deadline or an explicit cancellation
    #[error("Request canceled: {0}")]
    Canceled(String),
}

impl DomainError {
    /// Create a "message not found" error
    pub fn message_not_found(chat_id: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self::MessageNotFound {
            chat_id: chat_id.into(),
            message_id: message_id.into(),
        }
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::MessageNotFound { .. } => "UNKNOWN_MESSAGE",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::DecodeError(_) => "DECODE_ERROR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::Canceled(_) => "CANCELED",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MessageNotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is a decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::DecodeError(_))
    }

    /// Check if the request was canceled or timed out
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled(_))
    }
}
