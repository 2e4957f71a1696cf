//! Error types for velto-core
//!
//! This module provides error handling for the request store and the
//! creation flow, including error codes, severities and suggestions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Payment request not found
    RequestNotFound,
    /// Validation error
    ValidationError,
    /// Duplicate entry
    DuplicateEntry,
    /// Payment count disagrees with the payment ledger
    InconsistentLedger,
    /// Seed data could not be read
    SeedError,
    /// No signed-in session
    Unauthorized,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::RequestNotFound => write!(f, "REQUEST_NOT_FOUND"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::DuplicateEntry => write!(f, "DUPLICATE_ENTRY"),
            ErrorCode::InconsistentLedger => write!(f, "INCONSISTENT_LEDGER"),
            ErrorCode::SeedError => write!(f, "SEED_ERROR"),
            ErrorCode::Unauthorized => write!(f, "UNAUTHORIZED"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for velto-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Payment request not found: {id}")]
    RequestNotFound { id: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Duplicate entry: {entry}")]
    DuplicateEntry { entry: String },

    #[error("Request {id} records {recorded} payments but the ledger holds {events}")]
    InconsistentLedger {
        id: String,
        recorded: u32,
        events: usize,
    },

    #[error("Seed data error: {message}")]
    SeedError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::RequestNotFound { .. } => ErrorCode::RequestNotFound,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::DuplicateEntry { .. } => ErrorCode::DuplicateEntry,
            CoreError::InconsistentLedger { .. } => ErrorCode::InconsistentLedger,
            CoreError::SeedError { .. } => ErrorCode::SeedError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::RequestNotFound { .. } => ErrorSeverity::Info,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::DuplicateEntry { .. } => ErrorSeverity::Error,
            CoreError::InconsistentLedger { .. } => ErrorSeverity::Error,
            CoreError::SeedError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::RequestNotFound { .. } => {
                details = details
                    .with_suggestion("Check if the request ID is correct.".to_string())
                    .with_suggestion(
                        "Use the /api/requests endpoint to list all requests.".to_string(),
                    );
            }
            CoreError::ValidationError { message } => {
                details = details
                    .with_detail(serde_json::json!({ "validation_message": message }))
                    .with_suggestion(
                        "Amount must be greater than 0 and a description is required.".to_string(),
                    );
            }
            CoreError::InconsistentLedger { id, .. } => {
                details = details.with_suggestion(format!(
                    "Make payment_count of request '{}' match its payments in the seed data.",
                    id
                ));
            }
            CoreError::SeedError { message } => {
                details = details
                    .with_detail(serde_json::json!({ "seed_message": message }))
                    .with_suggestion(
                        "Check data.seed_file points to a YAML file with `requests` and `payments`."
                            .to_string(),
                    );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Email of the signed-in user, if any
    pub user: Option<String>,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            user: None,
            data: serde_json::json!({}),
        }
    }

    /// Add the acting user
    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Info => log::info!(
                target: "velto::error",
                "[{}] {} - Operation: {} - User: {:?}",
                error.code(),
                error,
                context.operation,
                context.user
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "velto::error",
                "[{}] {} - Operation: {} - User: {:?} - Data: {}",
                error.code(),
                error,
                context.operation,
                context.user,
                context.data
            ),
            ErrorSeverity::Error | ErrorSeverity::Critical => log::error!(
                target: "velto::error",
                "{} - Operation: {} - User: {:?}",
                error.to_details(),
                context.operation,
                context.user
            ),
        }
    }
}

// ==================== Tests ====================
