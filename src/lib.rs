//! # Agentdesk - Agent Configuration Engine
//!
//! Agentdesk creates and edits agent records: a name and instructions bound
//! to a model provider, a model, optional capabilities, staged files and tool
//! identifiers. One session drives one create or edit surface and commits
//! through a single persistence call.
//!
//! ## Features
//!
//! - **Capability gating**: per-session capability context
//! - **Provider catalog**: filtered from the backend's endpoint configuration
//! - **File staging**: context, knowledge and code attachments
//! - **Tool reconciliation**: built-in toggles merged into the tool set at submit
//! - **Pluggable persistence**: in-memory or HTTP agent stores
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use agentdesk::adapters::memory_store::InMemoryAgentStore;
//! use agentdesk::adapters::notifications::TracingNotifier;
//! use agentdesk::agents::locale::Catalog;
//! use agentdesk::agents::{AgentFormSession, SessionCollaborators, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let collaborators = SessionCollaborators {
//!         store: Arc::new(InMemoryAgentStore::new()),
//!         notifier: Arc::new(TracingNotifier),
//!         localizer: Arc::new(Catalog::english()),
//!     };
//!     let mut session = AgentFormSession::open_create(SessionConfig::default(), collaborators);
//!     let state = session.state_mut()?;
//!     state.set_name("Helper");
//!     state.set_provider("openai");
//!     state.set_model("gpt-4");
//!     session.submit().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Agentdesk follows Hexagonal Architecture:
//! - **Agents**: Form engine, domain types and ports
//! - **Adapters**: Persistence, endpoint sources and notification sinks
//! - **Config**: Configuration management

pub mod adapters;
pub mod agents;
pub mod cli;
pub mod config;
