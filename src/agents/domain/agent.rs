//! Agent record and payload types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool literal inserted when the code execution capability is enabled
pub const EXECUTE_CODE_TOOL: &str = "execute_code";
/// Tool literal inserted when the file search capability is enabled
pub const FILE_SEARCH_TOOL: &str = "file_search";
/// Tool literal inserted when the web search capability is enabled
pub const WEB_SEARCH_TOOL: &str = "web_search";

/// An agent record as returned by the persistence collaborator.
///
/// Every field is optional: records coming back from a backend are not
/// trusted to be complete, and hydration defaults whatever is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_parameters: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_after_tools: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_sequential_outputs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recursion_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_starters: Option<Vec<String>>,
    #[serde(rename = "isCollaborative", default, skip_serializing_if = "Option::is_none")]
    pub is_collaborative: Option<bool>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Agent {
    /// Whether the record's tool list contains `tool`
    pub fn has_tool(&self, tool: &str) -> bool {
        self.tools
            .as_ref()
            .map_or(false, |tools| tools.iter().any(|t| t == tool))
    }
}

/// Body of a create or update call.
///
/// `conversation_starters` and `is_collaborative` are `None` on the update
/// path unless the session is configured to send them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPayload {
    pub name: String,
    pub artifacts: String,
    pub description: String,
    pub instructions: String,
    pub model: String,
    pub tools: Vec<String>,
    pub provider: String,
    pub model_parameters: Map<String, Value>,
    pub agent_ids: Vec<String>,
    pub end_after_tools: bool,
    pub hide_sequential_outputs: bool,
    pub recursion_limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_starters: Option<Vec<String>>,
    #[serde(rename = "isCollaborative", default, skip_serializing_if = "Option::is_none")]
    pub is_collaborative: Option<bool>,
}

/// A selectable `{value, label}` option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringOption {
    pub value: String,
    pub label: String,
}

impl StringOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The provider field holds either a raw identifier or a picked option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderSelection {
    Id(String),
    Option(StringOption),
}

impl ProviderSelection {
    /// Normalize to the plain provider identifier
    pub fn value(&self) -> &str {
        match self {
            ProviderSelection::Id(id) => id,
            ProviderSelection::Option(option) => &option.value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }
}

impl Default for ProviderSelection {
    fn default() -> Self {
        ProviderSelection::Id(String::new())
    }
}

impl From<&str> for ProviderSelection {
    fn from(id: &str) -> Self {
        ProviderSelection::Id(id.to_string())
    }
}

impl From<String> for ProviderSelection {
    fn from(id: String) -> Self {
        ProviderSelection::Id(id)
    }
}

impl From<StringOption> for ProviderSelection {
    fn from(option: StringOption) -> Self {
        ProviderSelection::Option(option)
    }
}
