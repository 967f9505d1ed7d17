//! In-memory agent store

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::agents::domain::{Agent, AgentPayload, AgentStore};
use crate::agents::error::{PersistenceError, PersistenceResult};

/// In-memory agent store
#[derive(Clone, Default)]
pub struct InMemoryAgentStore {
    agents: Arc<RwLock<HashMap<String, Agent>>>,
}

impl InMemoryAgentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record; records without an id are ignored
    pub async fn insert(&self, agent: Agent) {
        if let Some(id) = agent.id.clone() {
            self.agents.write().await.insert(id, agent);
        }
    }

    pub async fn get(&self, id: &str) -> Option<Agent> {
        self.agents.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.agents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.agents.read().await.is_empty()
    }
}

fn apply_payload(agent: &mut Agent, payload: AgentPayload) {
    agent.name = Some(payload.name);
    agent.artifacts = Some(payload.artifacts);
    agent.description = Some(payload.description);
    agent.instructions = Some(payload.instructions);
    agent.model = Some(payload.model);
    agent.tools = Some(payload.tools);
    agent.provider = Some(payload.provider);
    agent.model_parameters = Some(payload.model_parameters);
    agent.agent_ids = Some(payload.agent_ids);
    agent.end_after_tools = Some(payload.end_after_tools);
    agent.hide_sequential_outputs = Some(payload.hide_sequential_outputs);
    agent.recursion_limit = Some(payload.recursion_limit);
    // omitted fields keep their stored value
    if payload.conversation_starters.is_some() {
        agent.conversation_starters = payload.conversation_starters;
    }
    if payload.is_collaborative.is_some() {
        agent.is_collaborative = payload.is_collaborative;
    }
}

#[async_trait]
impl AgentStore for InMemoryAgentStore {
    async fn create_agent(&self, payload: AgentPayload) -> PersistenceResult<Agent> {
        let id = format!("agent_{}", uuid::Uuid::new_v4().simple());
        let now = Utc::now();

        let mut agent = Agent {
            id: Some(id.clone()),
            created_at: Some(now),
            updated_at: Some(now),
            ..Agent::default()
        };
        apply_payload(&mut agent, payload);

        let mut agents = self.agents.write().await;
        if agents.contains_key(&id) {
            return Err(PersistenceError::Internal(format!("Duplicate agent id: {}", id)));
        }
        agents.insert(id.clone(), agent.clone());
        tracing::debug!(agent_id = %id, "Created agent");
        Ok(agent)
    }

    async fn update_agent(&self, id: &str, payload: AgentPayload) -> PersistenceResult<Agent> {
        let mut agents = self.agents.write().await;
        let agent = agents
            .get_mut(id)
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;

        apply_payload(agent, payload);
        agent.updated_at = Some(Utc::now());
        tracing::debug!(agent_id = %id, "Updated agent");
        Ok(agent.clone())
    }
}
