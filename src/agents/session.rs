//! Agent form session
//!
//! One open create or edit surface. The session owns the form state, the
//! staged files and the submission pipeline, and reports outcomes through
//! the notification sink. Creation is the edit flow without a seed record.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use super::domain::{
    resolve, Agent, AgentStore, CapabilityContext, CapabilityFlags, Localizer, Notification,
    NotificationSink, StringOption,
};
use super::error::{FormError, FormResult, ValidationError};
use super::files::{ExtendedFile, FileCategory, FileStagingStore, RawFile};
use super::form::AgentFormState;
use super::locale::keys;
use super::providers::{EndpointsConfig, ProviderCatalog};
use super::submission::{SubmissionKind, SubmissionOptions, SubmissionPipeline, SubmitPhase};
use crate::config::AgentDefaultsConfig;

/// Called with the saved record after a successful submission
pub type SuccessCallback = Box<dyn FnMut(&Agent) + Send>;

/// Session-wide inputs that do not change while the surface is open
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub context: CapabilityContext,
    pub options: SubmissionOptions,
    pub defaults: AgentDefaultsConfig,
    /// Provider keys offered for selection; empty offers all
    pub provider_allow_list: HashSet<String>,
}

/// External collaborators a session reports to
#[derive(Clone)]
pub struct SessionCollaborators {
    pub store: Arc<dyn AgentStore>,
    pub notifier: Arc<dyn NotificationSink>,
    pub localizer: Arc<dyn Localizer>,
}

pub struct AgentFormSession {
    kind: SubmissionKind,
    state: AgentFormState,
    flags: CapabilityFlags,
    staging: FileStagingStore,
    pipeline: SubmissionPipeline,
    config: SessionConfig,
    collaborators: SessionCollaborators,
    on_success: Option<SuccessCallback>,
    open: bool,
}

impl AgentFormSession {
    /// Open a creation surface with default state
    pub fn open_create(config: SessionConfig, collaborators: SessionCollaborators) -> Self {
        Self::open(None, config, collaborators)
    }

    /// Open an edit surface hydrated from `agent`
    pub fn open_edit(agent: &Agent, config: SessionConfig, collaborators: SessionCollaborators) -> Self {
        Self::open(Some(agent), config, collaborators)
    }

    fn open(seed: Option<&Agent>, config: SessionConfig, collaborators: SessionCollaborators) -> Self {
        let flags = resolve(&config.context);
        let pipeline = SubmissionPipeline::new(config.options);
        let mut session = Self {
            kind: SubmissionKind::Create,
            state: AgentFormState::default(),
            flags,
            staging: FileStagingStore::new(),
            pipeline,
            config,
            collaborators,
            on_success: None,
            open: true,
        };
        session.reopen(seed);
        session
    }

    /// Register the callback run after a successful submission
    pub fn on_success(mut self, callback: impl FnMut(&Agent) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Reset the session around a new seed: `None` for creation, a record for editing.
    /// Form state is rebuilt, staged files are dropped and the pipeline returns to idle.
    pub fn reopen(&mut self, seed: Option<&Agent>) {
        match seed {
            Some(agent) => {
                debug!(agent_id = agent.id.as_deref().unwrap_or("-"), "Opening edit session");
                self.kind = SubmissionKind::Update;
                self.state = AgentFormState::from_agent(agent);
            }
            None => {
                debug!("Opening create session");
                self.kind = SubmissionKind::Create;
                self.state = AgentFormState::for_create(&self.config.defaults);
            }
        }
        self.staging.clear();
        self.pipeline = SubmissionPipeline::new(self.config.options);
        self.open = true;
    }

    /// Discard edits and close the surface
    pub fn cancel(&mut self) {
        debug!("Session cancelled");
        self.reset_state();
        self.staging.clear();
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn kind(&self) -> SubmissionKind {
        self.kind
    }

    pub fn flags(&self) -> &CapabilityFlags {
        &self.flags
    }

    pub fn state(&self) -> &AgentFormState {
        &self.state
    }

    /// Mutable access to the form; fails once the surface is closed
    pub fn state_mut(&mut self) -> FormResult<&mut AgentFormState> {
        self.ensure_open()?;
        Ok(&mut self.state)
    }

    /// Providers selectable in this session
    pub fn providers(&self, endpoints: &EndpointsConfig) -> Vec<StringOption> {
        let mut catalog = ProviderCatalog::new(self.config.provider_allow_list.clone());
        let defaults = &self.config.defaults;
        if defaults.use_predefined {
            if let Some(label) = &defaults.provider_display_name {
                catalog = catalog.with_label(defaults.provider.as_str(), label.as_str());
            }
        }
        catalog.list(endpoints)
    }

    /// The predefined model as a labelled option, when defaults are in use
    pub fn predefined_model(&self) -> Option<StringOption> {
        let defaults = &self.config.defaults;
        if !defaults.use_predefined || defaults.model.is_empty() {
            return None;
        }
        let label = defaults.model_display_name.as_deref().unwrap_or(&defaults.model);
        Some(StringOption::new(defaults.model.as_str(), label))
    }

    /// Stage files under `category`, subject to its capability
    pub fn stage_files(
        &mut self,
        category: FileCategory,
        files: impl IntoIterator<Item = RawFile>,
    ) -> FormResult<Vec<String>> {
        self.ensure_open()?;
        self.staging.stage_checked(category, files, &self.flags)
    }

    pub fn remove_file(&mut self, category: FileCategory, file_id: &str) -> FormResult<Option<ExtendedFile>> {
        self.ensure_open()?;
        Ok(self.staging.remove(category, file_id))
    }

    /// Staged files. They are never part of the submitted payload.
    pub fn staging(&self) -> &FileStagingStore {
        &self.staging
    }

    pub fn phase(&self) -> SubmitPhase {
        self.pipeline.phase()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmitPhase> {
        self.pipeline.subscribe()
    }

    /// Commit the form through the pipeline.
    ///
    /// On success the create path resets its form, the callback runs and the
    /// surface closes. On any failure the form is left as it was and the
    /// surface stays open for a retry.
    pub async fn submit(&mut self) -> FormResult<Agent> {
        self.ensure_open()?;

        let result = self
            .pipeline
            .submit(
                self.kind,
                &self.state,
                &self.flags,
                self.collaborators.store.as_ref(),
            )
            .await;

        match result {
            Ok(agent) => {
                let key = match self.kind {
                    SubmissionKind::Create => keys::CREATE_SUCCESS,
                    SubmissionKind::Update => keys::UPDATE_SUCCESS,
                };
                self.notify(Notification::success(self.collaborators.localizer.localize(key)));

                if self.kind == SubmissionKind::Create {
                    self.reset_state();
                }
                if let Some(callback) = self.on_success.as_mut() {
                    callback(&agent);
                }
                self.open = false;
                self.pipeline.settle();
                info!(agent_id = agent.id.as_deref().unwrap_or("-"), "Session closed after save");
                Ok(agent)
            }
            Err(err) => {
                if let Some(message) = self.error_message(&err) {
                    self.notify(Notification::error(message));
                }
                self.pipeline.settle();
                Err(err)
            }
        }
    }

    fn error_message(&self, err: &FormError) -> Option<String> {
        let localizer = &self.collaborators.localizer;
        let message = match err {
            FormError::Validation(ValidationError::MissingProviderOrModel) => {
                localizer.localize(keys::MISSING_PROVIDER_MODEL)
            }
            FormError::Validation(ValidationError::MissingName) => localizer.localize(keys::MISSING_NAME),
            FormError::Validation(other) => other.to_string(),
            FormError::MissingIdentity => localizer.localize(keys::NO_AGENT_ID),
            FormError::Persistence(_) => match self.kind {
                SubmissionKind::Create => localizer.localize(keys::CREATE_ERROR),
                SubmissionKind::Update => localizer.localize(keys::UPDATE_ERROR),
            },
            FormError::SubmissionInFlight | FormError::SessionClosed => return None,
            other => other.to_string(),
        };
        Some(message)
    }

    fn notify(&self, notification: Notification) {
        self.collaborators.notifier.notify(notification);
    }

    fn reset_state(&mut self) {
        self.state = match self.kind {
            SubmissionKind::Create => AgentFormState::for_create(&self.config.defaults),
            SubmissionKind::Update => AgentFormState::default(),
        };
    }

    fn ensure_open(&self) -> FormResult<()> {
        if self.open {
            Ok(())
        } else {
            Err(FormError::SessionClosed)
        }
    }
}
