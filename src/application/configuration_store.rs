//! ConfigurationStore - versioned in-memory view of the portal settings.
//!
//! Readers grab the current `Arc<ConfigurationSnapshot>` and keep using it for
//! the rest of the operation. `reload` builds a complete new snapshot and
//! swaps the pointer, so a reader sees either the old or the new settings,
//! never a mix.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use crate::domain::configuration::{ConfigurationError, ConfigurationSnapshot};
use crate::domain::foundation::DomainError;
use crate::ports::ConfigurationRepository;

pub struct ConfigurationStore {
    repository: Arc<dyn ConfigurationRepository>,
    current: RwLock<Arc<ConfigurationSnapshot>>,
}

impl ConfigurationStore {
    /// Loads the initial snapshot (version 1).
    pub async fn load(repository: Arc<dyn ConfigurationRepository>) -> Result<Self, DomainError> {
        let settings = repository.load_all().await?;
        let snapshot = ConfigurationSnapshot::new(1, settings);
        tracing::info!("Loaded {} configuration settings", snapshot.len());
        Ok(Self {
            repository,
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<ConfigurationSnapshot> {
        let guard = self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    pub fn version(&self) -> u64 {
        self.snapshot().version()
    }

    pub fn string(&self, group: &str, key: &str) -> Result<String, ConfigurationError> {
        self.snapshot().get_string(group, key).map(str::to_string)
    }

    pub fn numeric(&self, group: &str, key: &str) -> Result<i64, ConfigurationError> {
        self.snapshot().get_numeric(group, key)
    }

    pub fn enum_value<T>(&self, group: &str, key: &str) -> Result<T, ConfigurationError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.snapshot().get_enum(group, key)
    }

    pub fn array(&self, group: &str, key: &str) -> Result<Vec<String>, ConfigurationError> {
        self.snapshot().get_array(group, key)
    }

    pub fn is_enabled(&self, group: &str, key: &str, value: &str) -> bool {
        self.snapshot().is_enabled(group, key, value)
    }

    /// Persists a runtime override. Takes effect on the next `reload`.
    pub async fn set_runtime_value(
        &self,
        group: &str,
        key: &str,
        value: Option<&str>,
    ) -> Result<(), DomainError> {
        self.repository.set_runtime_value(group, key, value).await?;
        tracing::info!(group, key, "Runtime configuration value changed");
        Ok(())
    }

    /// Re-reads every setting and swaps in a new snapshot.
    ///
    /// Returns the new version. On failure the current snapshot stays in place.
    pub async fn reload(&self) -> Result<u64, DomainError> {
        let settings = self.repository.load_all().await?;

        let mut guard = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        let version = guard.version() + 1;
        *guard = Arc::new(ConfigurationSnapshot::new(version, settings));
        drop(guard);

        tracing::info!("Configuration reloaded, version {}", version);
        Ok(version)
    }
}
