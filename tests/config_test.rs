use agentdesk::agents::{AgentCapability, CapabilityContext, ToolReconciliation};
use agentdesk::cli::Cli;
use agentdesk::config::Settings;
use clap::Parser;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_file_uses_defaults() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let settings = Settings::from_path(temp_dir.path().join("absent.toml"))?;

    assert_eq!(settings.api.base_url, "http://localhost:3080/api");
    assert_eq!(settings.api.timeout_seconds, 30);
    assert_eq!(settings.api.token_env, "AGENTDESK_API_TOKEN");
    assert!(settings.providers.allow_list.is_empty());
    assert_eq!(settings.capability_context(), CapabilityContext::Unrestricted);
    assert_eq!(settings.submission.tool_reconciliation, ToolReconciliation::Union);
    assert!(!settings.submission.include_collaboration_on_update);
    Ok(())
}

#[test]
fn test_load_full_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("agentdesk.toml");

    let agentdesk_toml = r#"
[api]
base_url = "https://chat.example.com/api"
timeout_seconds = 10

[providers]
allow_list = ["openAI", "anthropic"]

[capabilities]
enabled = ["file_search", "web_search", "tools"]

[agent_defaults]
use_predefined = true
provider = "openAI"
model = "gpt-4o"
provider_display_name = "OpenAI"

[submission]
tool_reconciliation = "append"
include_collaboration_on_update = true
"#;
    fs::write(&path, agentdesk_toml)?;

    let settings = Settings::from_path(&path)?;
    assert_eq!(settings.api.base_url, "https://chat.example.com/api");
    assert_eq!(settings.api.timeout_seconds, 10);
    assert_eq!(settings.providers.allow_list.len(), 2);
    assert_eq!(settings.submission.tool_reconciliation, ToolReconciliation::Append);

    let session = settings.session_config();
    assert!(session.defaults.use_predefined);
    assert_eq!(session.defaults.provider_display_name.as_deref(), Some("OpenAI"));
    assert!(session.provider_allow_list.contains("anthropic"));
    match session.context {
        CapabilityContext::Restricted(enabled) => {
            assert_eq!(enabled.len(), 3);
            assert!(enabled.contains(&AgentCapability::WebSearch));
            assert!(!enabled.contains(&AgentCapability::ExecuteCode));
        }
        other => panic!("expected restricted context, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_invalid_file_is_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("agentdesk.toml");
    fs::write(
        &path,
        r#"
[api]
base_url = "ftp://example.com"

[agent_defaults]
use_predefined = true
"#,
    )?;

    let err = Settings::from_path(&path).unwrap_err().to_string();
    assert!(err.contains("Configuration validation failed"));
    assert!(err.contains("api.base_url"));
    assert!(err.contains("agent_defaults.provider"));
    Ok(())
}

#[test]
fn test_cli_overrides_api_url() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("agentdesk.toml");
    fs::write(&path, "[api]\nbase_url = \"http://file.example.com/api\"\n")?;

    let cli = Cli::parse_from([
        "agentdesk",
        "--config",
        path.to_str().unwrap(),
        "--api-url",
        "http://cli.example.com/api",
        "providers",
    ]);
    let settings = Settings::new_with_cli(&cli)?;
    assert_eq!(settings.api.base_url, "http://cli.example.com/api");
    Ok(())
}
