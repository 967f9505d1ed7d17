//! Error types for the agent form engine

use thiserror::Error;

use super::domain::AgentCapability;
use super::files::FileCategory;

/// Errors that can occur while editing or submitting an agent form
#[derive(Debug, Error)]
pub enum FormError {
    /// The form failed submit-time validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Edit submission without a known agent identifier
    #[error("No agent ID found")]
    MissingIdentity,

    /// The persistence collaborator rejected the call
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Two staged files were assigned the same local identifier
    #[error("Staging collision in {category}: file id '{file_id}' already staged")]
    StagingCollision {
        category: FileCategory,
        file_id: String,
    },

    /// The capability backing this operation is disabled for the session
    #[error("Capability disabled: {0}")]
    CapabilityDisabled(AgentCapability),

    /// Tool identifiers must be non-empty
    #[error("Invalid tool identifier: '{0}'")]
    InvalidTool(String),

    /// A submission for this session is already awaiting the collaborator
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    /// The session surface has been closed
    #[error("Session is closed")]
    SessionClosed,
}

/// Submit-time validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing provider or model")]
    MissingProviderOrModel,

    #[error("Missing required field: name")]
    MissingName,

    #[error("Name is {len} characters, maximum is 256")]
    NameTooLong { len: usize },

    #[error("Description is {len} characters, maximum is 512")]
    DescriptionTooLong { len: usize },
}

/// Errors reported by a persistence collaborator
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backend answered with a non-success status
    #[error("Request rejected: {status} - {message}")]
    Rejected { status: u16, message: String },

    /// Agent not found
    #[error("Agent not found: {0}")]
    NotFound(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for PersistenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PersistenceError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            PersistenceError::Network(format!("Connection error: {}", err))
        } else if err.is_decode() {
            PersistenceError::Serialization(err.to_string())
        } else {
            PersistenceError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::Serialization(err.to_string())
    }
}

/// Result type alias for form operations
pub type FormResult<T> = Result<T, FormError>;

/// Result type alias for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;
