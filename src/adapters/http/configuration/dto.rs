//! Bodies for configuration endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct SetRuntimeValueRequest {
    /// `null` clears the override so the default applies again.
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationVersionResponse {
    pub version: u64,
}
