use std::collections::HashSet;
use thiserror::Error;

use crate::config::{AgentDefaultsConfig, ApiSettings, ProviderSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_api(&settings.api) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_providers(&settings.providers) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_agent_defaults(&settings.agent_defaults) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_api(api: &ApiSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if api.base_url.is_empty() {
            errors.push(ValidationError::MissingField("api.base_url".to_string()));
        } else if !api.base_url.starts_with("http://") && !api.base_url.starts_with("https://") {
            errors.push(ValidationError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if api.timeout_seconds == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "api.timeout_seconds".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if api.token_env.is_empty() {
            errors.push(ValidationError::MissingField("api.token_env".to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_providers(providers: &ProviderSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for key in &providers.allow_list {
            if key.is_empty() {
                errors.push(ValidationError::InvalidValue {
                    field: "providers.allow_list".to_string(),
                    reason: "Provider keys cannot be empty".to_string(),
                });
            } else if !seen.insert(key) {
                errors.push(ValidationError::Duplicate(format!("providers.allow_list: {}", key)));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_agent_defaults(defaults: &AgentDefaultsConfig) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // Only enforced when the defaults are in use
        if defaults.use_predefined {
            if defaults.provider.is_empty() {
                errors.push(ValidationError::MissingField("agent_defaults.provider".to_string()));
            }
            if defaults.model.is_empty() {
                errors.push(ValidationError::MissingField("agent_defaults.model".to_string()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
