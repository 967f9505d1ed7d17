//! Capability resolution for an editing session

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Optional feature areas an agent can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentCapability {
    ExecuteCode,
    FileSearch,
    WebSearch,
    /// File context extracted with OCR
    Ocr,
    Artifacts,
    Tools,
    Actions,
}

impl AgentCapability {
    pub const ALL: [AgentCapability; 7] = [
        AgentCapability::ExecuteCode,
        AgentCapability::FileSearch,
        AgentCapability::WebSearch,
        AgentCapability::Ocr,
        AgentCapability::Artifacts,
        AgentCapability::Tools,
        AgentCapability::Actions,
    ];
}

impl std::fmt::Display for AgentCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentCapability::ExecuteCode => write!(f, "execute_code"),
            AgentCapability::FileSearch => write!(f, "file_search"),
            AgentCapability::WebSearch => write!(f, "web_search"),
            AgentCapability::Ocr => write!(f, "ocr"),
            AgentCapability::Artifacts => write!(f, "artifacts"),
            AgentCapability::Tools => write!(f, "tools"),
            AgentCapability::Actions => write!(f, "actions"),
        }
    }
}

/// Input to capability resolution, threaded in from the surrounding session.
///
/// `Unrestricted` is the default and enables every capability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CapabilityContext {
    #[default]
    Unrestricted,
    Restricted(HashSet<AgentCapability>),
}

impl CapabilityContext {
    /// Build a context from an optional allow-list; `None` means unrestricted
    pub fn from_enabled(enabled: Option<&[AgentCapability]>) -> Self {
        match enabled {
            Some(list) => CapabilityContext::Restricted(list.iter().copied().collect()),
            None => CapabilityContext::Unrestricted,
        }
    }

    fn allows(&self, capability: AgentCapability) -> bool {
        match self {
            CapabilityContext::Unrestricted => true,
            CapabilityContext::Restricted(enabled) => enabled.contains(&capability),
        }
    }
}

/// Which capability toggles are enabled for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityFlags {
    pub ocr_enabled: bool,
    pub code_enabled: bool,
    pub tools_enabled: bool,
    pub actions_enabled: bool,
    pub artifacts_enabled: bool,
    pub web_search_enabled: bool,
    pub file_search_enabled: bool,
}

impl CapabilityFlags {
    pub fn is_enabled(&self, capability: AgentCapability) -> bool {
        match capability {
            AgentCapability::ExecuteCode => self.code_enabled,
            AgentCapability::FileSearch => self.file_search_enabled,
            AgentCapability::WebSearch => self.web_search_enabled,
            AgentCapability::Ocr => self.ocr_enabled,
            AgentCapability::Artifacts => self.artifacts_enabled,
            AgentCapability::Tools => self.tools_enabled,
            AgentCapability::Actions => self.actions_enabled,
        }
    }

    /// Whether the capabilities section has anything to show
    pub fn has_capability_section(&self) -> bool {
        self.code_enabled
            || self.file_search_enabled
            || self.artifacts_enabled
            || self.ocr_enabled
            || self.web_search_enabled
    }
}

/// Resolve the capability flags for a context. Pure.
pub fn resolve(context: &CapabilityContext) -> CapabilityFlags {
    CapabilityFlags {
        ocr_enabled: context.allows(AgentCapability::Ocr),
        code_enabled: context.allows(AgentCapability::ExecuteCode),
        tools_enabled: context.allows(AgentCapability::Tools),
        actions_enabled: context.allows(AgentCapability::Actions),
        artifacts_enabled: context.allows(AgentCapability::Artifacts),
        web_search_enabled: context.allows(AgentCapability::WebSearch),
        file_search_enabled: context.allows(AgentCapability::FileSearch),
    }
}
