//! Submission pipeline
//!
//! Turns a form state into exactly one create or update call. Capability
//! flags are folded into the tool list here and nowhere else.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::domain::{Agent, AgentPayload, AgentStore, CapabilityFlags};
use super::error::{FormError, FormResult, ValidationError};
use super::form::{AgentFormState, BuiltinTool, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};

/// How flag-derived tool literals are merged into the selected tools
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolReconciliation {
    /// Insert each literal only if it is not already present
    #[default]
    Union,
    /// Append each literal unconditionally; duplicates are possible
    Append,
}

/// Pipeline behaviour knobs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOptions {
    #[serde(default)]
    pub tool_reconciliation: ToolReconciliation,
    /// Send conversation starters and the collaborative flag on update too
    #[serde(default)]
    pub include_collaboration_on_update: bool,
}

/// Which persistence call a submission issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Create,
    Update,
}

/// Observable pipeline phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Merge the enabled built-in flags into a snapshot of the selected tools.
///
/// The form's own tool set is never modified. A disabled `tools` capability
/// drops the selected tools; a flag whose capability is disabled contributes
/// nothing.
pub fn reconcile_tools(
    state: &AgentFormState,
    flags: &CapabilityFlags,
    mode: ToolReconciliation,
) -> Vec<String> {
    let mut tools = if flags.tools_enabled {
        state.tools().to_vec()
    } else {
        Vec::new()
    };

    for tool in BuiltinTool::ALL {
        if !state.builtin(tool) || !flags.is_enabled(tool.capability()) {
            continue;
        }
        let literal = tool.literal();
        match mode {
            ToolReconciliation::Append => tools.push(literal.to_string()),
            ToolReconciliation::Union => {
                if !tools.iter().any(|t| t == literal) {
                    tools.push(literal.to_string());
                }
            }
        }
    }

    tools
}

/// Submit-time validation
pub fn validate(state: &AgentFormState) -> Result<(), ValidationError> {
    if state.provider().is_empty() || state.model().is_empty() {
        return Err(ValidationError::MissingProviderOrModel);
    }
    if state.name().trim().is_empty() {
        return Err(ValidationError::MissingName);
    }

    let len = state.name().chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong { len });
    }
    let len = state.description().chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong { len });
    }

    Ok(())
}

/// Build the persistence payload for `kind`
pub fn build_payload(
    state: &AgentFormState,
    flags: &CapabilityFlags,
    kind: SubmissionKind,
    options: &SubmissionOptions,
) -> AgentPayload {
    let send_collaboration =
        kind == SubmissionKind::Create || options.include_collaboration_on_update;

    AgentPayload {
        name: state.name().to_string(),
        artifacts: if flags.artifacts_enabled {
            state.artifacts().to_string()
        } else {
            String::new()
        },
        description: state.description().to_string(),
        instructions: state.instructions().to_string(),
        model: state.model().to_string(),
        tools: reconcile_tools(state, flags, options.tool_reconciliation),
        provider: state.provider().value().to_string(),
        model_parameters: state.model_parameters().clone(),
        agent_ids: state.agent_ids().to_vec(),
        end_after_tools: state.end_after_tools(),
        hide_sequential_outputs: state.hide_sequential_outputs(),
        recursion_limit: state.recursion_limit(),
        conversation_starters: send_collaboration.then(|| state.conversation_starters().to_vec()),
        is_collaborative: send_collaboration.then(|| state.is_collaborative()),
    }
}

/// Validates, builds and issues one persistence call per submit
#[derive(Debug)]
pub struct SubmissionPipeline {
    options: SubmissionOptions,
    phase: watch::Sender<SubmitPhase>,
}

impl SubmissionPipeline {
    pub fn new(options: SubmissionOptions) -> Self {
        let (phase, _) = watch::channel(SubmitPhase::Idle);
        Self { options, phase }
    }

    pub fn options(&self) -> &SubmissionOptions {
        &self.options
    }

    pub fn phase(&self) -> SubmitPhase {
        *self.phase.borrow()
    }

    /// Watch phase changes, e.g. to disable a commit control while submitting
    pub fn subscribe(&self) -> watch::Receiver<SubmitPhase> {
        self.phase.subscribe()
    }

    /// Return to `Idle` once the outcome has been surfaced.
    /// Has no effect while a submission is in flight.
    pub fn settle(&self) {
        self.phase.send_if_modified(|phase| match phase {
            SubmitPhase::Succeeded | SubmitPhase::Failed => {
                *phase = SubmitPhase::Idle;
                true
            }
            _ => false,
        });
    }

    /// Submit `state`, leaving the pipeline in `Succeeded` or `Failed`.
    ///
    /// Validation and identity failures never reach the store.
    pub async fn submit(
        &self,
        kind: SubmissionKind,
        state: &AgentFormState,
        flags: &CapabilityFlags,
        store: &dyn AgentStore,
    ) -> FormResult<Agent> {
        if self.phase() == SubmitPhase::Submitting {
            warn!("Submission rejected, another one is in flight");
            return Err(FormError::SubmissionInFlight);
        }

        if let Err(err) = validate(state) {
            debug!(error = %err, "Submission failed validation");
            self.phase.send_replace(SubmitPhase::Failed);
            return Err(err.into());
        }

        let agent_id = match kind {
            SubmissionKind::Create => None,
            SubmissionKind::Update => match state.id() {
                Some(id) => Some(id.to_string()),
                None => {
                    warn!("Update submitted without an agent id");
                    self.phase.send_replace(SubmitPhase::Failed);
                    return Err(FormError::MissingIdentity);
                }
            },
        };

        let mut acquired = false;
        self.phase.send_if_modified(|phase| {
            if *phase == SubmitPhase::Submitting {
                false
            } else {
                *phase = SubmitPhase::Submitting;
                acquired = true;
                true
            }
        });
        if !acquired {
            return Err(FormError::SubmissionInFlight);
        }

        let payload = build_payload(state, flags, kind, &self.options);
        info!(
            agent_id = agent_id.as_deref().unwrap_or("-"),
            provider = %payload.provider,
            model = %payload.model,
            tools = payload.tools.len(),
            "Submitting agent"
        );

        let result = match &agent_id {
            None => store.create_agent(payload).await,
            Some(id) => store.update_agent(id, payload).await,
        };

        match result {
            Ok(agent) => {
                info!(agent_id = agent.id.as_deref().unwrap_or("-"), "Agent saved");
                self.phase.send_replace(SubmitPhase::Succeeded);
                Ok(agent)
            }
            Err(err) => {
                warn!(error = %err, "Agent submission failed");
                self.phase.send_replace(SubmitPhase::Failed);
                Err(err.into())
            }
        }
    }
}

impl Default for SubmissionPipeline {
    fn default() -> Self {
        Self::new(SubmissionOptions::default())
    }
}
