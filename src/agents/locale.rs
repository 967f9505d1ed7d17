//! Built-in localization table for session notifications

use std::collections::HashMap;

use super::domain::Localizer;

/// Localization keys used by the engine
pub mod keys {
    pub const MISSING_PROVIDER_MODEL: &str = "com_agents_missing_provider_model";
    pub const MISSING_NAME: &str = "com_agents_missing_name";
    pub const NO_AGENT_ID: &str = "com_agents_no_agent_id";
    pub const CREATE_SUCCESS: &str = "com_assistants_create_success";
    pub const CREATE_ERROR: &str = "com_assistants_create_error";
    pub const UPDATE_SUCCESS: &str = "com_assistants_update_success";
    pub const UPDATE_ERROR: &str = "com_assistants_update_error";
}

const ENGLISH: &[(&str, &str)] = &[
    (keys::MISSING_PROVIDER_MODEL, "Provider and model are required"),
    (keys::MISSING_NAME, "Agent name is required"),
    (keys::NO_AGENT_ID, "No agent ID found"),
    (keys::CREATE_SUCCESS, "Successfully created"),
    (keys::CREATE_ERROR, "There was an error creating the agent"),
    (keys::UPDATE_SUCCESS, "Successfully updated"),
    (keys::UPDATE_ERROR, "There was an error updating the agent"),
];

/// In-memory string table. Unknown keys localize to themselves.
#[derive(Debug, Clone)]
pub struct Catalog {
    strings: HashMap<String, String>,
}

impl Catalog {
    /// The built-in English table
    pub fn english() -> Self {
        Self {
            strings: ENGLISH
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Override or add a translation
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(key.into(), value.into());
        self
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::english()
    }
}

impl Localizer for Catalog {
    fn localize(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_keys() {
        let catalog = Catalog::english();
        assert_eq!(catalog.localize(keys::NO_AGENT_ID), "No agent ID found");
        assert_eq!(catalog.localize("com_ui_unknown"), "com_ui_unknown");
    }

    #[test]
    fn test_override() {
        let catalog = Catalog::english().with(keys::CREATE_SUCCESS, "Agent created");
        assert_eq!(catalog.localize(keys::CREATE_SUCCESS), "Agent created");
    }
}
