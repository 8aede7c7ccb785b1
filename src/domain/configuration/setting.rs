//! A single portal configuration row.

use serde::{Deserialize, Serialize};

/// Key/value setting with a shipped default and an optional runtime override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationSetting {
    pub group: String,
    pub key: String,
    pub default_value: String,
    pub runtime_value: Option<String>,
}

impl ConfigurationSetting {
    pub fn new(
        group: impl Into<String>,
        key: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            key: key.into(),
            default_value: default_value.into(),
            runtime_value: None,
        }
    }

    /// Builder-style runtime override.
    pub fn with_runtime_value(mut self, value: impl Into<String>) -> Self {
        self.runtime_value = Some(value.into());
        self
    }

    /// Effective value: the runtime override if set, else the default.
    pub fn value(&self) -> &str {
        self.runtime_value.as_deref().unwrap_or(&self.default_value)
    }
}
