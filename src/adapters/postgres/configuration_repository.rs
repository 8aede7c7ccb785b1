//! PostgreSQL implementation of ConfigurationRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::configuration::ConfigurationSetting;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ConfigurationRepository;

use super::db_error;

pub struct PostgresConfigurationRepository {
    pool: PgPool,
}

impl PostgresConfigurationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SettingRow {
    group_key: String,
    setting_key: String,
    default_value: String,
    runtime_value: Option<String>,
}

impl From<SettingRow> for ConfigurationSetting {
    fn from(row: SettingRow) -> Self {
        ConfigurationSetting {
            group: row.group_key,
            key: row.setting_key,
            default_value: row.default_value,
            runtime_value: row.runtime_value,
        }
    }
}

#[async_trait]
impl ConfigurationRepository for PostgresConfigurationRepository {
    async fn load_all(&self) -> Result<Vec<ConfigurationSetting>, DomainError> {
        let rows: Vec<SettingRow> = sqlx::query_as(
            r#"
            SELECT group_key, setting_key, default_value, runtime_value
            FROM portal_configuration
            ORDER BY group_key, setting_key
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load configuration"))?;

        Ok(rows.into_iter().map(ConfigurationSetting::from).collect())
    }

    async fn set_runtime_value(
        &self,
        group: &str,
        key: &str,
        value: Option<&str>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE portal_configuration SET runtime_value = $3
            WHERE group_key = $1 AND setting_key = $2
            "#,
        )
        .bind(group)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(db_error("set configuration value"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ConfigurationNotFound,
                format!("Unknown setting {}.{}", group, key),
            ));
        }
        Ok(())
    }
}
