//! Tool selector
//!
//! The set of tool identifiers attached to an agent. The built-in capability
//! flags live on the form state and are merged in only at submit time.

use indexmap::IndexSet;

use super::error::{FormError, FormResult};

/// Unique tool identifiers, kept in selection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSet {
    tools: IndexSet<String>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `tool_id`; returns `false` if it was already present
    pub fn add(&mut self, tool_id: impl Into<String>) -> FormResult<bool> {
        let tool_id = tool_id.into();
        if tool_id.is_empty() {
            return Err(FormError::InvalidTool(tool_id));
        }
        Ok(self.tools.insert(tool_id))
    }

    /// Remove `tool_id`; returns `false` if it was not present
    pub fn remove(&mut self, tool_id: &str) -> bool {
        self.tools.shift_remove(tool_id)
    }

    /// Add if absent, remove if present. Returns whether the tool is now selected.
    pub fn toggle(&mut self, tool_id: impl Into<String>) -> FormResult<bool> {
        let tool_id = tool_id.into();
        if self.tools.contains(&tool_id) {
            self.remove(&tool_id);
            Ok(false)
        } else {
            self.add(tool_id)
        }
    }

    pub fn contains(&self, tool_id: &str) -> bool {
        self.tools.contains(tool_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn clear(&mut self) {
        self.tools.clear();
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.tools.iter().cloned().collect()
    }
}

/// Duplicates and empty identifiers coming from a stored record are dropped
impl FromIterator<String> for ToolSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            tools: iter.into_iter().filter(|t| !t.is_empty()).collect(),
        }
    }
}
