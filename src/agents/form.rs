//! Agent form state
//!
//! The working record behind a create or edit surface. Created from defaults
//! on the create path and hydrated from an existing record on the edit path.

use serde_json::{Map, Value};

use super::domain::{
    Agent, AgentCapability, ProviderSelection, EXECUTE_CODE_TOOL, FILE_SEARCH_TOOL, WEB_SEARCH_TOOL,
};
use super::tools::ToolSet;
use crate::config::AgentDefaultsConfig;

/// Maximum agent name length, in characters
pub const MAX_NAME_LEN: usize = 256;
/// Maximum description length, in characters
pub const MAX_DESCRIPTION_LEN: usize = 512;
/// Recursion limit used when none is given
pub const DEFAULT_RECURSION_LIMIT: u32 = 5;
pub const MIN_RECURSION_LIMIT: u32 = 1;
pub const MAX_RECURSION_LIMIT: u32 = 10;

/// The built-in capability toggles that map onto tool literals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTool {
    ExecuteCode,
    FileSearch,
    WebSearch,
}

impl BuiltinTool {
    pub const ALL: [BuiltinTool; 3] = [BuiltinTool::ExecuteCode, BuiltinTool::FileSearch, BuiltinTool::WebSearch];

    /// The tool identifier this toggle contributes at submit time
    pub fn literal(&self) -> &'static str {
        match self {
            BuiltinTool::ExecuteCode => EXECUTE_CODE_TOOL,
            BuiltinTool::FileSearch => FILE_SEARCH_TOOL,
            BuiltinTool::WebSearch => WEB_SEARCH_TOOL,
        }
    }

    pub fn capability(&self) -> AgentCapability {
        match self {
            BuiltinTool::ExecuteCode => AgentCapability::ExecuteCode,
            BuiltinTool::FileSearch => AgentCapability::FileSearch,
            BuiltinTool::WebSearch => AgentCapability::WebSearch,
        }
    }
}

/// Editable agent configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AgentFormState {
    id: Option<String>,
    name: String,
    description: String,
    instructions: String,
    provider: ProviderSelection,
    model: String,
    tools: ToolSet,
    execute_code: bool,
    file_search: bool,
    web_search: bool,
    model_parameters: Map<String, Value>,
    artifacts: String,
    agent_ids: Vec<String>,
    end_after_tools: bool,
    hide_sequential_outputs: bool,
    recursion_limit: u32,
    conversation_starters: Vec<String>,
    is_collaborative: bool,
}

impl Default for AgentFormState {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            instructions: String::new(),
            provider: ProviderSelection::default(),
            model: String::new(),
            tools: ToolSet::new(),
            execute_code: false,
            file_search: false,
            web_search: false,
            model_parameters: Map::new(),
            artifacts: String::new(),
            agent_ids: Vec::new(),
            end_after_tools: false,
            hide_sequential_outputs: false,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            conversation_starters: Vec::new(),
            is_collaborative: false,
        }
    }
}

impl AgentFormState {
    /// Default record for the create path, seeded with predefined provider/model when configured
    pub fn for_create(defaults: &AgentDefaultsConfig) -> Self {
        let mut state = Self::default();
        if defaults.use_predefined {
            state.provider = ProviderSelection::Id(defaults.provider.clone());
            state.model = defaults.model.clone();
        }
        state
    }

    /// Project an existing record into form shape.
    ///
    /// Missing fields fall back to their defaults, and the three built-in
    /// toggles are derived from the record's tool list.
    pub fn from_agent(agent: &Agent) -> Self {
        let recursion_limit = match agent.recursion_limit {
            Some(limit) if limit > 0 => limit.clamp(MIN_RECURSION_LIMIT, MAX_RECURSION_LIMIT),
            _ => DEFAULT_RECURSION_LIMIT,
        };

        let mut state = Self {
            id: agent.id.clone().filter(|id| !id.is_empty()),
            name: agent.name.clone().unwrap_or_default(),
            description: agent.description.clone().unwrap_or_default(),
            instructions: agent.instructions.clone().unwrap_or_default(),
            provider: ProviderSelection::Id(agent.provider.clone().unwrap_or_default()),
            model: agent.model.clone().unwrap_or_default(),
            tools: agent.tools.clone().unwrap_or_default().into_iter().collect(),
            execute_code: agent.has_tool(EXECUTE_CODE_TOOL),
            file_search: agent.has_tool(FILE_SEARCH_TOOL),
            web_search: agent.has_tool(WEB_SEARCH_TOOL),
            model_parameters: agent.model_parameters.clone().unwrap_or_default(),
            artifacts: agent.artifacts.clone().unwrap_or_default(),
            agent_ids: agent.agent_ids.clone().unwrap_or_default(),
            end_after_tools: agent.end_after_tools.unwrap_or(false),
            hide_sequential_outputs: agent.hide_sequential_outputs.unwrap_or(false),
            recursion_limit,
            conversation_starters: Vec::new(),
            is_collaborative: agent.is_collaborative.unwrap_or(false),
        };
        state.set_conversation_starters(agent.conversation_starters.clone().unwrap_or_default());
        state
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the name, truncated to 256 characters
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = truncate_chars(name.into(), MAX_NAME_LEN);
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Set the description, truncated to 512 characters
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = truncate_chars(description.into(), MAX_DESCRIPTION_LEN);
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn set_instructions(&mut self, instructions: impl Into<String>) {
        self.instructions = instructions.into();
    }

    pub fn provider(&self) -> &ProviderSelection {
        &self.provider
    }

    /// Select a provider. Model ids are provider-scoped, so this always clears the model.
    pub fn set_provider(&mut self, provider: impl Into<ProviderSelection>) {
        self.provider = provider.into();
        self.model.clear();
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolSet {
        &mut self.tools
    }

    pub fn builtin(&self, tool: BuiltinTool) -> bool {
        match tool {
            BuiltinTool::ExecuteCode => self.execute_code,
            BuiltinTool::FileSearch => self.file_search,
            BuiltinTool::WebSearch => self.web_search,
        }
    }

    pub fn set_builtin(&mut self, tool: BuiltinTool, enabled: bool) {
        match tool {
            BuiltinTool::ExecuteCode => self.execute_code = enabled,
            BuiltinTool::FileSearch => self.file_search = enabled,
            BuiltinTool::WebSearch => self.web_search = enabled,
        }
    }

    pub fn model_parameters(&self) -> &Map<String, Value> {
        &self.model_parameters
    }

    pub fn set_model_parameters(&mut self, parameters: Map<String, Value>) {
        self.model_parameters = parameters;
    }

    pub fn artifacts(&self) -> &str {
        &self.artifacts
    }

    pub fn set_artifacts(&mut self, artifacts: impl Into<String>) {
        self.artifacts = artifacts.into();
    }

    pub fn agent_ids(&self) -> &[String] {
        &self.agent_ids
    }

    pub fn set_agent_ids(&mut self, agent_ids: Vec<String>) {
        self.agent_ids = agent_ids;
    }

    pub fn end_after_tools(&self) -> bool {
        self.end_after_tools
    }

    pub fn set_end_after_tools(&mut self, value: bool) {
        self.end_after_tools = value;
    }

    pub fn hide_sequential_outputs(&self) -> bool {
        self.hide_sequential_outputs
    }

    pub fn set_hide_sequential_outputs(&mut self, value: bool) {
        self.hide_sequential_outputs = value;
    }

    pub fn recursion_limit(&self) -> u32 {
        self.recursion_limit
    }

    /// Set the recursion limit, clamped into 1..=10
    pub fn set_recursion_limit(&mut self, limit: u32) {
        self.recursion_limit = limit.clamp(MIN_RECURSION_LIMIT, MAX_RECURSION_LIMIT);
    }

    pub fn conversation_starters(&self) -> &[String] {
        &self.conversation_starters
    }

    /// Replace the starters; blank entries are dropped
    pub fn set_conversation_starters(&mut self, starters: Vec<String>) {
        self.conversation_starters = starters.into_iter().filter(|s| !s.trim().is_empty()).collect();
    }

    /// Replace the starters from one-per-line text
    pub fn set_conversation_starters_text(&mut self, text: &str) {
        self.set_conversation_starters(text.split('\n').map(str::to_string).collect());
    }

    pub fn is_collaborative(&self) -> bool {
        self.is_collaborative
    }

    pub fn set_collaborative(&mut self, value: bool) {
        self.is_collaborative = value;
    }
}

fn truncate_chars(value: String, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_agent() -> Agent {
        serde_json::from_value(json!({
            "id": "a1",
            "name": "Researcher",
            "description": "Finds things",
            "provider": "anthropic",
            "model": "claude-3-sonnet-20240229",
            "tools": ["file_search", "calculator", "execute_code"],
            "model_parameters": { "temperature": 0.2 },
            "recursion_limit": 8,
            "conversation_starters": ["Hello"],
            "isCollaborative": true
        }))
        .unwrap()
    }

    #[test]
    fn test_create_defaults() {
        let state = AgentFormState::default();
        assert!(state.id().is_none());
        assert!(state.provider().is_empty());
        assert_eq!(state.model(), "");
        assert!(state.tools().is_empty());
        assert_eq!(state.recursion_limit(), DEFAULT_RECURSION_LIMIT);
        for tool in BuiltinTool::ALL {
            assert!(!state.builtin(tool));
        }
    }

    #[test]
    fn test_predefined_defaults_seed_create_path() {
        let defaults = AgentDefaultsConfig {
            use_predefined: true,
            provider: "openai".to_string(),
            model: "gpt-4".to_string(),
            provider_display_name: Some("OpenAI".to_string()),
            model_display_name: None,
        };
        let state = AgentFormState::for_create(&defaults);
        assert_eq!(state.provider().value(), "openai");
        assert_eq!(state.model(), "gpt-4");

        let state = AgentFormState::for_create(&AgentDefaultsConfig::default());
        assert!(state.provider().is_empty());
    }

    #[test]
    fn test_hydration_copies_fields_and_derives_flags() {
        let agent = sample_agent();
        let state = AgentFormState::from_agent(&agent);

        assert_eq!(state.id(), Some("a1"));
        assert_eq!(state.name(), "Researcher");
        assert_eq!(state.provider().value(), "anthropic");
        assert_eq!(state.model(), "claude-3-sonnet-20240229");
        assert_eq!(state.recursion_limit(), 8);
        assert_eq!(state.model_parameters()["temperature"], 0.2);
        assert!(state.is_collaborative());

        assert!(state.builtin(BuiltinTool::ExecuteCode));
        assert!(state.builtin(BuiltinTool::FileSearch));
        assert!(!state.builtin(BuiltinTool::WebSearch));
    }

    #[test]
    fn test_hydration_flags_match_membership_for_every_combination() {
        let literals = [EXECUTE_CODE_TOOL, FILE_SEARCH_TOOL, WEB_SEARCH_TOOL];
        for mask in 0..8u8 {
            let tools: Vec<String> = literals
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, t)| t.to_string())
                .collect();
            let agent = Agent {
                tools: Some(tools.clone()),
                ..Agent::default()
            };
            let state = AgentFormState::from_agent(&agent);
            for tool in BuiltinTool::ALL {
                assert_eq!(state.builtin(tool), tools.iter().any(|t| t == tool.literal()));
            }
        }
    }

    #[test]
    fn test_hydration_defaults_missing_fields() {
        let state = AgentFormState::from_agent(&Agent {
            recursion_limit: Some(0),
            ..Agent::default()
        });
        assert!(state.id().is_none());
        assert_eq!(state.name(), "");
        assert_eq!(state.artifacts(), "");
        assert!(state.agent_ids().is_empty());
        assert!(!state.end_after_tools());
        assert_eq!(state.recursion_limit(), DEFAULT_RECURSION_LIMIT);
    }

    #[test]
    fn test_hydration_clamps_recursion_limit() {
        let state = AgentFormState::from_agent(&Agent {
            recursion_limit: Some(25),
            ..Agent::default()
        });
        assert_eq!(state.recursion_limit(), MAX_RECURSION_LIMIT);
    }

    #[test]
    fn test_hydration_drops_blank_starters() {
        let state = AgentFormState::from_agent(&Agent {
            conversation_starters: Some(vec!["".to_string(), "  ".to_string(), "ok".to_string()]),
            ..Agent::default()
        });
        assert_eq!(state.conversation_starters(), &["ok".to_string()]);
    }

    #[test]
    fn test_set_provider_clears_model() {
        let mut state = AgentFormState::from_agent(&sample_agent());
        for provider in ["openai", "anthropic", "", "google"] {
            state.set_model("some-model");
            state.set_provider(provider);
            assert_eq!(state.model(), "");
            assert_eq!(state.provider().value(), provider);
        }
    }

    #[test]
    fn test_length_caps() {
        let mut state = AgentFormState::default();
        state.set_name("n".repeat(300));
        assert_eq!(state.name().chars().count(), MAX_NAME_LEN);
        state.set_description("é".repeat(600));
        assert_eq!(state.description().chars().count(), MAX_DESCRIPTION_LEN);
    }

    #[test]
    fn test_recursion_limit_clamped() {
        let mut state = AgentFormState::default();
        state.set_recursion_limit(0);
        assert_eq!(state.recursion_limit(), 1);
        state.set_recursion_limit(42);
        assert_eq!(state.recursion_limit(), 10);
        state.set_recursion_limit(7);
        assert_eq!(state.recursion_limit(), 7);
    }

    #[test]
    fn test_conversation_starters_text() {
        let mut state = AgentFormState::default();
        state.set_conversation_starters_text("What can you do?\n\n   \nSummarize this");
        assert_eq!(
            state.conversation_starters(),
            &["What can you do?".to_string(), "Summarize this".to_string()]
        );
    }
}
