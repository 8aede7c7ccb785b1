//! HTTP adapter for membership endpoints.
//!
//! - `GET /api/memberships` - Caller's active membership
//! - `POST /api/memberships/cancel` - Cancel caller's membership
//! - `POST /api/admin/memberships` - Create a membership for a user
//! - `POST /api/admin/memberships/expire` - Expire ended memberships

pub mod dto;
mod handlers;
mod routes;

pub use routes::{membership_admin_routes, membership_routes};
