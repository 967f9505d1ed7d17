//! Domain types for the agent form engine
//!
//! Records, capability flags and the ports the engine talks through.

mod agent;
mod capability;
mod notification;

pub use agent::*;
pub use capability::*;
pub use notification::*;

use async_trait::async_trait;

use crate::agents::error::PersistenceResult;

/// Port for the persistence collaborator that stores agent records.
///
/// Both calls are issued at most once per submission and never retried.
#[async_trait]
pub trait AgentStore: Send + Sync {
    /// Create a new agent from a payload
    async fn create_agent(&self, payload: AgentPayload) -> PersistenceResult<Agent>;

    /// Update the agent identified by `id`
    async fn update_agent(&self, id: &str, payload: AgentPayload) -> PersistenceResult<Agent>;
}

/// Fire-and-forget sink for operator notifications
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Maps a localization key to a display string
pub trait Localizer: Send + Sync {
    fn localize(&self, key: &str) -> String;
}
