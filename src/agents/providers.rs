//! Provider catalog
//!
//! Derives the selectable model providers from a raw endpoint configuration
//! map. Assistants-style endpoints and the reserved meta/legacy endpoints are
//! never offered; an optional allow-list narrows the rest.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::domain::StringOption;

/// The meta endpoint that serves agents themselves
pub const AGENTS_ENDPOINT: &str = "agents";
/// Legacy browser endpoint
pub const CHATGPT_BROWSER_ENDPOINT: &str = "chatGPTBrowser";
/// Legacy plugins endpoint
pub const GPT_PLUGINS_ENDPOINT: &str = "gptPlugins";

const RESERVED_ENDPOINTS: [&str; 3] = [AGENTS_ENDPOINT, CHATGPT_BROWSER_ENDPOINT, GPT_PLUGINS_ENDPOINT];

/// Metadata attached to one endpoint key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointMeta {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub endpoint_type: Option<String>,
    #[serde(rename = "iconURL", default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(rename = "userProvide", default, skip_serializing_if = "Option::is_none")]
    pub user_provide: Option<bool>,
    /// Remaining fields, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Provider key to endpoint metadata, in insertion order.
/// A backend may send `null` for an endpoint it knows but has not configured.
pub type EndpointsConfig = IndexMap<String, Option<EndpointMeta>>;

/// Whether `endpoint` is an assistants-style endpoint (`assistants`, `azureAssistants`, ...)
pub fn is_assistants_endpoint(endpoint: &str) -> bool {
    endpoint.to_lowercase().ends_with("assistants")
}

/// Project a provider key into a selectable option
pub fn create_provider_option(provider: &str) -> StringOption {
    StringOption::new(provider, provider)
}

/// List providers selectable for an agent, following the input's key order
pub fn list_providers(endpoints: &EndpointsConfig, allow_list: &HashSet<String>) -> Vec<StringOption> {
    ProviderCatalog::new(allow_list.clone()).list(endpoints)
}

/// Provider filter with optional display-name overrides
#[derive(Debug, Clone, Default)]
pub struct ProviderCatalog {
    allow_list: HashSet<String>,
    labels: HashMap<String, String>,
}

impl ProviderCatalog {
    pub fn new(allow_list: HashSet<String>) -> Self {
        Self {
            allow_list,
            labels: HashMap::new(),
        }
    }

    /// Display `provider` as `label` instead of its raw key
    pub fn with_label(mut self, provider: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(provider.into(), label.into());
        self
    }

    /// Whether `key` survives the filter
    pub fn is_selectable(&self, key: &str) -> bool {
        if is_assistants_endpoint(key) {
            return false;
        }
        if !self.allow_list.is_empty() && !self.allow_list.contains(key) {
            return false;
        }
        !RESERVED_ENDPOINTS.contains(&key)
    }

    pub fn list(&self, endpoints: &EndpointsConfig) -> Vec<StringOption> {
        endpoints
            .keys()
            .filter(|key| self.is_selectable(key))
            .map(|key| match self.labels.get(key) {
                Some(label) => StringOption::new(key.as_str(), label.as_str()),
                None => create_provider_option(key),
            })
            .collect()
    }
}
