//! In-memory portal configuration.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::configuration::keys::portal_defaults;
use crate::domain::configuration::ConfigurationSetting;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ConfigurationRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigurationRepository {
    settings: Arc<RwLock<Vec<ConfigurationSetting>>>,
}

impl InMemoryConfigurationRepository {
    pub fn new(settings: Vec<ConfigurationSetting>) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    /// Repository holding the portal's seeded defaults.
    pub fn with_defaults() -> Self {
        Self::new(portal_defaults())
    }

    /// Adds or replaces a default value (useful for tests).
    pub async fn put_default(&self, group: &str, key: &str, value: &str) {
        let mut settings = self.settings.write().await;
        settings.retain(|s| !(s.group == group && s.key == key));
        settings.push(ConfigurationSetting::new(group, key, value));
    }
}

#[async_trait]
impl ConfigurationRepository for InMemoryConfigurationRepository {
    async fn load_all(&self) -> Result<Vec<ConfigurationSetting>, DomainError> {
        Ok(self.settings.read().await.clone())
    }

    async fn set_runtime_value(
        &self,
        group: &str,
        key: &str,
        value: Option<&str>,
    ) -> Result<(), DomainError> {
        let mut settings = self.settings.write().await;
        let setting = settings
            .iter_mut()
            .find(|s| s.group == group && s.key == key)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ConfigurationNotFound,
                    format!("No setting {}.{}", group, key),
                )
            })?;
        setting.runtime_value = value.map(str::to_string);
        Ok(())
    }
}
