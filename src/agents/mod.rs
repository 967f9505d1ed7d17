//! Agent configuration form engine
//!
//! Everything needed to create or edit an agent record:
//! - capability resolution for a session
//! - the provider catalog derived from endpoint configuration
//! - per-category file staging
//! - the tool selector and the editable form state
//! - the submission pipeline and the session that drives it
//!
//! ## Architecture
//!
//! - `domain/` - Records, capability flags and collaborator ports
//! - `form` / `tools` / `files` - Mutable slices of one open session
//! - `submission` - Validation, tool reconciliation and the persistence call
//! - `session` - Create/edit surface lifecycle

pub mod domain;
pub mod error;
pub mod files;
pub mod form;
pub mod locale;
pub mod providers;
pub mod session;
pub mod submission;
pub mod tools;


// Re-export commonly used types
pub use domain::*;
pub use error::*;
pub use files::{ExtendedFile, FileCategory, FileStagingStore, RawFile};
pub use form::{AgentFormState, BuiltinTool};
pub use providers::{list_providers, EndpointsConfig, ProviderCatalog};
pub use session::{AgentFormSession, SessionCollaborators, SessionConfig};
pub use submission::{SubmissionKind, SubmissionOptions, SubmitPhase, ToolReconciliation};
pub use tools::ToolSet;
