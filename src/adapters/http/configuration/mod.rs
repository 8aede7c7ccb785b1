//! HTTP adapter for runtime configuration.
//!
//! - `PUT /api/admin/configuration/:group/:key` - Set or clear an override
//! - `POST /api/admin/configuration/reload` - Reload; returns the new version

pub mod dto;
mod handlers;
mod routes;

pub use routes::configuration_admin_routes;
