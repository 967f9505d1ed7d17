use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use config::{Config, File};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

pub mod validator;

use crate::agents::domain::{AgentCapability, CapabilityContext};
use crate::agents::session::SessionConfig;
use crate::agents::submission::SubmissionOptions;
use crate::cli::Cli;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "agentdesk.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default)]
    pub providers: ProviderSettings,
    #[serde(default)]
    pub capabilities: CapabilitySettings,
    #[serde(default)]
    pub agent_defaults: AgentDefaultsConfig,
    #[serde(default)]
    pub submission: SubmissionOptions,
}

/// Backend API connection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_token_env() -> String {
    "AGENTDESK_API_TOKEN".to_string()
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderSettings {
    /// Provider keys offered for selection; empty allows every provider
    #[serde(default)]
    pub allow_list: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CapabilitySettings {
    /// Enabled capabilities; absent means no restrictions
    #[serde(default)]
    pub enabled: Option<Vec<AgentCapability>>,
}

/// Predefined provider/model for new agents
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AgentDefaultsConfig {
    #[serde(default)]
    pub use_predefined: bool,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub provider_display_name: Option<String>,
    #[serde(default)]
    pub model_display_name: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_path(DEFAULT_CONFIG_FILE)
    }

    /// Create settings from CLI arguments (config file, then CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from `path`; a missing file yields the defaults
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let settings = Self::load(path.as_ref())?;
        settings.validate()?;
        Ok(settings)
    }

    fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path).required(false))
            .set_default("api.base_url", "http://localhost:3080/api")?
            .set_default("api.timeout_seconds", 30)?
            .set_default("api.token_env", default_token_env())?
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        tracing::debug!(path = %path.display(), base_url = %settings.api.base_url, "Loaded settings");
        Ok(settings)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(api_url) = &cli.api_url {
            self.api.base_url = api_url.clone();
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// Bearer token from the configured environment variable
    pub fn api_token(&self) -> Option<SecretString> {
        std::env::var(&self.api.token_env)
            .ok()
            .filter(|token| !token.is_empty())
            .map(SecretString::from)
    }

    pub fn capability_context(&self) -> CapabilityContext {
        CapabilityContext::from_enabled(self.capabilities.enabled.as_deref())
    }

    /// Session inputs derived from these settings
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            context: self.capability_context(),
            options: self.submission,
            defaults: self.agent_defaults.clone(),
            provider_allow_list: self.providers.allow_list.iter().cloned().collect::<HashSet<_>>(),
        }
    }
}
