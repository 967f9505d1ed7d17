use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::agents::error::FormResult;
use crate::agents::files::FileCategory;
use crate::agents::form::{AgentFormState, BuiltinTool};

/// Agentdesk - create and edit agent configurations
#[derive(Parser, Debug, Clone)]
#[command(name = "agentdesk", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "AGENTDESK_CONFIG", default_value = "agentdesk.toml")]
    pub config: PathBuf,

    /// Backend API base URL
    #[arg(long, env = "AGENTDESK_API_URL")]
    pub api_url: Option<String>,

    /// Read endpoint configuration from a JSON, YAML or TOML file instead of the API
    #[arg(long, env = "AGENTDESK_ENDPOINTS")]
    pub endpoints: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List providers selectable for agents
    Providers,

    /// Create a new agent
    Create(AgentArgs),

    /// Edit an existing agent
    Edit {
        /// Agent identifier
        id: String,

        /// Remove a tool from the agent (repeatable)
        #[arg(long = "remove-tool")]
        remove_tools: Vec<String>,

        #[command(flatten)]
        args: AgentArgs,
    },
}

/// Field overrides applied to the form before submitting
#[derive(Args, Debug, Clone, Default)]
pub struct AgentArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub instructions: Option<String>,

    /// Provider key; selecting a provider clears the model
    #[arg(long)]
    pub provider: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    /// Add a tool identifier (repeatable)
    #[arg(long = "tool")]
    pub tools: Vec<String>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub execute_code: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub file_search: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub web_search: Option<bool>,

    /// Conversation starter (repeatable)
    #[arg(long = "starter")]
    pub starters: Vec<String>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub collaborative: Option<bool>,

    /// Recursion limit, clamped into 1..=10
    #[arg(long)]
    pub recursion_limit: Option<u32>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub end_after_tools: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub hide_sequential_outputs: Option<bool>,

    /// Stage a file for OCR context (repeatable)
    #[arg(long = "context-file")]
    pub context_files: Vec<PathBuf>,

    /// Stage a file for file search (repeatable)
    #[arg(long = "knowledge-file")]
    pub knowledge_files: Vec<PathBuf>,

    /// Stage a file for code execution (repeatable)
    #[arg(long = "code-file")]
    pub code_files: Vec<PathBuf>,
}

impl AgentArgs {
    /// Apply the overrides to `state`. Provider is applied before model.
    pub fn apply(&self, state: &mut AgentFormState) -> FormResult<()> {
        if let Some(name) = &self.name {
            state.set_name(name.as_str());
        }
        if let Some(description) = &self.description {
            state.set_description(description.as_str());
        }
        if let Some(instructions) = &self.instructions {
            state.set_instructions(instructions.as_str());
        }
        if let Some(provider) = &self.provider {
            state.set_provider(provider.as_str());
        }
        if let Some(model) = &self.model {
            state.set_model(model.as_str());
        }
        for tool in &self.tools {
            state.tools_mut().add(tool.as_str())?;
        }

        let toggles = [
            (BuiltinTool::ExecuteCode, self.execute_code),
            (BuiltinTool::FileSearch, self.file_search),
            (BuiltinTool::WebSearch, self.web_search),
        ];
        for (tool, value) in toggles {
            if let Some(enabled) = value {
                state.set_builtin(tool, enabled);
            }
        }

        if !self.starters.is_empty() {
            state.set_conversation_starters(self.starters.clone());
        }
        if let Some(collaborative) = self.collaborative {
            state.set_collaborative(collaborative);
        }
        if let Some(limit) = self.recursion_limit {
            state.set_recursion_limit(limit);
        }
        if let Some(value) = self.end_after_tools {
            state.set_end_after_tools(value);
        }
        if let Some(value) = self.hide_sequential_outputs {
            state.set_hide_sequential_outputs(value);
        }
        Ok(())
    }

    /// Files to stage, per category
    pub fn staged_files(&self) -> [(FileCategory, &[PathBuf]); 3] {
        [
            (FileCategory::Context, self.context_files.as_slice()),
            (FileCategory::Knowledge, self.knowledge_files.as_slice()),
            (FileCategory::Code, self.code_files.as_slice()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["agentdesk", "providers"]);
        assert_eq!(cli.config, PathBuf::from("agentdesk.toml"));
        assert!(cli.api_url.is_none());
        assert!(cli.endpoints.is_none());
        assert!(matches!(cli.command, Command::Providers));
    }

    #[test]
    fn test_create_with_args() {
        let cli = Cli::parse_from([
            "agentdesk",
            "--config",
            "custom.toml",
            "--api-url",
            "https://chat.example.com/api",
            "create",
            "--name",
            "Helper",
            "--provider",
            "openai",
            "--model",
            "gpt-4",
            "--tool",
            "calculator",
            "--web-search",
            "--execute-code",
            "false",
            "--starter",
            "Hi there",
            "--recursion-limit",
            "3",
            "--code-file",
            "main.py",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.api_url.as_deref(), Some("https://chat.example.com/api"));

        let Command::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.name.as_deref(), Some("Helper"));
        assert_eq!(args.tools, vec!["calculator".to_string()]);
        assert_eq!(args.web_search, Some(true));
        assert_eq!(args.execute_code, Some(false));
        assert!(args.file_search.is_none());
        assert_eq!(args.code_files, vec![PathBuf::from("main.py")]);
    }

    #[test]
    fn test_edit_with_remove_tool() {
        let cli = Cli::parse_from([
            "agentdesk",
            "edit",
            "a1",
            "--remove-tool",
            "calculator",
            "--model",
            "gpt-4o",
        ]);
        match cli.command {
            Command::Edit { id, remove_tools, args } => {
                assert_eq!(id, "a1");
                assert_eq!(remove_tools, vec!["calculator".to_string()]);
                assert_eq!(args.model.as_deref(), Some("gpt-4o"));
            }
            other => panic!("expected edit, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_sets_provider_before_model() {
        let args = AgentArgs {
            name: Some("Helper".to_string()),
            provider: Some("openai".to_string()),
            model: Some("gpt-4".to_string()),
            web_search: Some(true),
            recursion_limit: Some(99),
            ..AgentArgs::default()
        };
        let mut state = AgentFormState::default();
        args.apply(&mut state).unwrap();

        assert_eq!(state.provider().value(), "openai");
        assert_eq!(state.model(), "gpt-4");
        assert!(state.builtin(BuiltinTool::WebSearch));
        assert_eq!(state.recursion_limit(), 10);
    }

    #[test]
    fn test_apply_provider_alone_clears_model() {
        let args = AgentArgs {
            provider: Some("google".to_string()),
            ..AgentArgs::default()
        };
        let mut state = AgentFormState::default();
        state.set_provider("openai");
        state.set_model("gpt-4");
        args.apply(&mut state).unwrap();
        assert_eq!(state.model(), "");
    }
}
