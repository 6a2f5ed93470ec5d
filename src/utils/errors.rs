//! Error handling for AmiHelper
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for AmiHelper application
#[derive(Error, Debug)]
pub enum AmiHelperError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Registration not found: {registration_id}")]
    RegistrationNotFound { registration_id: i64 },

    #[error("FAQ category not found: {category_id}")]
    CategoryNotFound { category_id: i64 },

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for AmiHelper operations
pub type Result<T> = std::result::Result<T, AmiHelperError>;

impl AmiHelperError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            AmiHelperError::Database(_) => false,
            AmiHelperError::Migration(_) => false,
            AmiHelperError::Telegram(_) => true,
            AmiHelperError::Redis(_) => true,
            AmiHelperError::Serialization(_) => false,
            AmiHelperError::Io(_) => true,
            AmiHelperError::Config(_) => false,
            AmiHelperError::PermissionDenied(_) => false,
            AmiHelperError::UserNotFound { .. } => false,
            AmiHelperError::EventNotFound { .. } => false,
            AmiHelperError::RegistrationNotFound { .. } => false,
            AmiHelperError::CategoryNotFound { .. } => false,
            AmiHelperError::Authentication(_) => false,
            AmiHelperError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AmiHelperError::Database(_) => ErrorSeverity::Critical,
            AmiHelperError::Migration(_) => ErrorSeverity::Critical,
            AmiHelperError::Config(_) => ErrorSeverity::Critical,
            AmiHelperError::PermissionDenied(_) => ErrorSeverity::Warning,
            AmiHelperError::Authentication(_) => ErrorSeverity::Warning,
            AmiHelperError::InvalidInput(_) => ErrorSeverity::Info,
            AmiHelperError::UserNotFound { .. }
            | AmiHelperError::EventNotFound { .. }
            | AmiHelperError::RegistrationNotFound { .. }
            | AmiHelperError::CategoryNotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
