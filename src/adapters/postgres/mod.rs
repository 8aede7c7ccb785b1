//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresPaymentRepository` - Payment rows, write sets in one transaction
//! - `PostgresEventRepository` - Events and participant rows
//! - `PostgresMembershipRepository` - Membership aggregates
//! - `PostgresConfigurationRepository` - `portal_configuration` rows
//! - `PostgresNotificationQueue` - `notification_queue` inserts

mod configuration_repository;
mod event_repository;
mod membership_repository;
mod notification_queue;
mod payment_repository;

pub use configuration_repository::PostgresConfigurationRepository;
pub use event_repository::PostgresEventRepository;
pub use membership_repository::PostgresMembershipRepository;
pub use notification_queue::PostgresNotificationQueue;
pub use payment_repository::PostgresPaymentRepository;

use std::fmt::Display;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, UserId};

/// Maps a sqlx failure to `DatabaseError` with context.
fn db_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("Failed to {}: {}", action, e))
}

/// Parses a stored enum column.
fn parse_column<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e| DomainError::database(format!("Invalid {} value '{}': {}", column, value, e)))
}

fn parse_user_id(column: &str, value: String) -> Result<UserId, DomainError> {
    UserId::new(value).map_err(|e| DomainError::database(format!("Invalid {}: {}", column, e)))
}

fn to_u32(column: &str, value: i32) -> Result<u32, DomainError> {
    u32::try_from(value)
        .map_err(|_| DomainError::database(format!("Negative {} value: {}", column, value)))
}

fn to_i32(column: &str, value: u32) -> Result<i32, DomainError> {
    i32::try_from(value).map_err(|_| {
        DomainError::validation(column, format!("{} exceeds the storable range", value))
    })
}
