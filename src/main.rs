use agentdesk::adapters::endpoints::load_endpoints_file;
use agentdesk::adapters::http_store::HttpAgentStore;
use agentdesk::adapters::notifications::TracingNotifier;
use agentdesk::agents::files::RawFile;
use agentdesk::agents::locale::Catalog;
use agentdesk::agents::providers::EndpointsConfig;
use agentdesk::agents::{AgentFormSession, SessionCollaborators};
use agentdesk::cli::{AgentArgs, Cli, Command};
use agentdesk::config::Settings;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    info!(base_url = %settings.api.base_url, "Using agents API");

    let store = Arc::new(HttpAgentStore::new(&settings.api, settings.api_token())?);
    let collaborators = SessionCollaborators {
        store: store.clone(),
        notifier: Arc::new(TracingNotifier),
        localizer: Arc::new(Catalog::english()),
    };

    match &cli.command {
        Command::Providers => {
            let endpoints = load_endpoints(&cli, &store).await?;
            let session = AgentFormSession::open_create(settings.session_config(), collaborators);
            for option in session.providers(&endpoints) {
                println!("{}\t{}", option.value, option.label);
            }
            if let Some(model) = session.predefined_model() {
                println!("default model\t{}\t{}", model.value, model.label);
            }
        }
        Command::Create(args) => {
            let mut session = AgentFormSession::open_create(settings.session_config(), collaborators);
            args.apply(session.state_mut()?)?;
            stage_files(&mut session, args).await?;

            let agent = session.submit().await?;
            println!("{}", serde_json::to_string_pretty(&agent)?);
        }
        Command::Edit { id, remove_tools, args } => {
            let existing = store.fetch_agent(id).await?;
            let mut session = AgentFormSession::open_edit(&existing, settings.session_config(), collaborators);

            let state = session.state_mut()?;
            for tool in remove_tools {
                state.tools_mut().remove(tool);
            }
            args.apply(state)?;
            stage_files(&mut session, args).await?;

            let agent = session.submit().await?;
            println!("{}", serde_json::to_string_pretty(&agent)?);
        }
    }

    Ok(())
}

async fn load_endpoints(cli: &Cli, store: &HttpAgentStore) -> anyhow::Result<EndpointsConfig> {
    match &cli.endpoints {
        Some(path) => load_endpoints_file(path).await,
        None => Ok(store.fetch_endpoints().await?),
    }
}

async fn stage_files(session: &mut AgentFormSession, args: &AgentArgs) -> anyhow::Result<()> {
    for (category, paths) in args.staged_files() {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(RawFile::from_path(path).await?);
        }
        if files.is_empty() {
            continue;
        }
        let ids = session.stage_files(category, files)?;
        info!(%category, count = ids.len(), "Staged files");
    }
    Ok(())
}
