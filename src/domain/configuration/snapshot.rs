//! Immutable, versioned view over all configuration settings.
//!
//! A snapshot is never mutated after construction. Reloading produces a new
//! snapshot with a higher version.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

use super::ConfigurationSetting;

/// Errors reading a typed value out of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Configuration {group}.{key} is not defined")]
    Missing { group: String, key: String },

    #[error("Configuration {group}.{key} has invalid value '{value}': {reason}")]
    Invalid {
        group: String,
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigurationError {
    fn missing(group: &str, key: &str) -> Self {
        ConfigurationError::Missing {
            group: group.to_string(),
            key: key.to_string(),
        }
    }

    fn invalid(group: &str, key: &str, value: &str, reason: impl Display) -> Self {
        ConfigurationError::Invalid {
            group: group.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigurationSnapshot {
    version: u64,
    settings: HashMap<(String, String), ConfigurationSetting>,
}

impl ConfigurationSnapshot {
    pub fn new(version: u64, settings: impl IntoIterator<Item = ConfigurationSetting>) -> Self {
        let settings = settings
            .into_iter()
            .map(|s| ((s.group.clone(), s.key.clone()), s))
            .collect();
        Self { version, settings }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    pub fn get(&self, group: &str, key: &str) -> Option<&ConfigurationSetting> {
        self.settings.get(&(group.to_string(), key.to_string()))
    }

    pub fn get_string(&self, group: &str, key: &str) -> Result<&str, ConfigurationError> {
        self.get(group, key)
            .map(ConfigurationSetting::value)
            .ok_or_else(|| ConfigurationError::missing(group, key))
    }

    pub fn get_numeric(&self, group: &str, key: &str) -> Result<i64, ConfigurationError> {
        let raw = self.get_string(group, key)?;
        raw.trim()
            .parse::<i64>()
            .map_err(|e| ConfigurationError::invalid(group, key, raw, e))
    }

    /// Parses the value with the target type's `FromStr`.
    pub fn get_enum<T>(&self, group: &str, key: &str) -> Result<T, ConfigurationError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.get_string(group, key)?;
        raw.parse::<T>()
            .map_err(|e| ConfigurationError::invalid(group, key, raw, e))
    }

    pub fn get_date(&self, group: &str, key: &str) -> Result<NaiveDate, ConfigurationError> {
        let raw = self.get_string(group, key)?;
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|e| ConfigurationError::invalid(group, key, raw, e))
    }

    /// Comma-separated list; entries are trimmed and empty entries dropped.
    pub fn get_array(&self, group: &str, key: &str) -> Result<Vec<String>, ConfigurationError> {
        let raw = self.get_string(group, key)?;
        Ok(raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// True if the array setting contains `value`. Undefined settings are disabled.
    pub fn is_enabled(&self, group: &str, key: &str, value: &str) -> bool {
        self.get_array(group, key)
            .map(|values| values.iter().any(|v| v == value))
            .unwrap_or(false)
    }
}
