//! Portal configuration storage port.

use async_trait::async_trait;

use crate::domain::configuration::ConfigurationSetting;
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait ConfigurationRepository: Send + Sync {
    /// Every stored setting.
    async fn load_all(&self) -> Result<Vec<ConfigurationSetting>, DomainError>;

    /// Sets or clears (`None`) the runtime override of an existing setting.
    ///
    /// # Errors
    ///
    /// - `ConfigurationNotFound` if no row exists for `(group, key)`
    /// - `DatabaseError` on persistence failure
    async fn set_runtime_value(
        &self,
        group: &str,
        key: &str,
        value: Option<&str>,
    ) -> Result<(), DomainError>;
}
