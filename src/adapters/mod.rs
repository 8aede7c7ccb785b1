//! Adapters - Implementations of port interfaces.
//!
//! - `http` - axum REST API over the application handlers
//! - `memory` - in-process ports for tests and local runs
//! - `postgres` - sqlx-backed ports

pub mod http;
pub mod memory;
pub mod postgres;
