//! Error types for ticket-desk
//!
//! Lookups that miss are not errors: they return `None`. Everything that
//! reaches this enum is a deterministic rejection the caller has to handle.

use thiserror::Error;

/// Result type alias for ticket-desk operations
pub type Result<T> = std::result::Result<T, TicketError>;

/// Main error type for ticket-desk
#[derive(Error, Debug)]
pub enum TicketError {
    /// A field failed validation at construction, update or request parsing
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// A user with the same id is already registered
    #[error("User already registered: {id}")]
    DuplicateUser { id: String },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration loaded but holds unusable values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON snapshot could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TicketError {
    /// Create a validation error for the given field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for input rejections (as opposed to setup failures)
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::DuplicateUser { .. })
    }

    /// Name of the offending field, when the error is tied to one
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::DuplicateUser { .. } => Some("user_id"),
            _ => None,
        }
    }

    /// Message suitable for showing to an end user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { field, message } => format!("{field}: {message}"),
            _ => self.to_string(),
        }
    }

    /// Hints on how to fix the error
    #[must_use]
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation { field, .. } => match field.as_str() {
                "status" => vec!["Valid statuses: ToDo, InProgress, Done".to_string()],
                "priority" => vec!["Valid priorities: Low, Medium, High, Critical".to_string()],
                "role" => vec!["Valid roles: Member, Admin".to_string()],
                "email" => vec!["Email addresses must contain '@'".to_string()],
                "assignee_id" | "created_by" => {
                    vec!["Register the user before linking it to a ticket".to_string()]
                },
                _ => vec![],
            },
            Self::DuplicateUser { .. } => {
                vec!["Choose a different user id or look up the existing user".to_string()]
            },
            Self::Config(_) | Self::InvalidConfig(_) => vec![
                "Check TICKET_DESK_* environment variables and the config file".to_string(),
            ],
            Self::Serialization(_) => vec![],
        }
    }
}
