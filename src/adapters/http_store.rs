//! HTTP agent store
//!
//! Talks to the backend's agents API with `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::agents::domain::{Agent, AgentPayload, AgentStore};
use crate::agents::error::{PersistenceError, PersistenceResult};
use crate::agents::providers::EndpointsConfig;
use crate::config::ApiSettings;

pub struct HttpAgentStore {
    client: Client,
    base_url: String,
    token: Option<SecretString>,
}

impl HttpAgentStore {
    pub fn new(settings: &ApiSettings, token: Option<SecretString>) -> PersistenceResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| PersistenceError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn agent_url(&self, id: &str) -> String {
        format!("{}/agents/{}", self.base_url, urlencoding::encode(id))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Fetch one agent record
    pub async fn fetch_agent(&self, id: &str) -> PersistenceResult<Agent> {
        debug!(agent_id = %id, "Fetching agent");
        let response = self
            .authorized(self.client.get(self.agent_url(id)))
            .send()
            .await?;
        Self::parse(response, Some(id)).await
    }

    /// Fetch the backend's endpoint configuration
    pub async fn fetch_endpoints(&self) -> PersistenceResult<EndpointsConfig> {
        let response = self
            .authorized(self.client.get(format!("{}/endpoints", self.base_url)))
            .send()
            .await?;
        Self::parse(response, None).await
    }

    async fn parse<T: DeserializeOwned>(response: Response, id: Option<&str>) -> PersistenceResult<T> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(PersistenceError::NotFound(id.to_string()));
            }
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Agents API rejected request");
            return Err(PersistenceError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl AgentStore for HttpAgentStore {
    async fn create_agent(&self, payload: AgentPayload) -> PersistenceResult<Agent> {
        let response = self
            .authorized(self.client.post(format!("{}/agents", self.base_url)))
            .json(&payload)
            .send()
            .await?;
        Self::parse(response, None).await
    }

    async fn update_agent(&self, id: &str, payload: AgentPayload) -> PersistenceResult<Agent> {
        let response = self
            .authorized(self.client.patch(self.agent_url(id)))
            .json(&payload)
            .send()
            .await?;
        Self::parse(response, Some(id)).await
    }
}
