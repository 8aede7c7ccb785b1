//! HTTP adapter for payment endpoints.
//!
//! - `GET /api/payments` - Active payments with bound events
//! - `GET /api/payments/best-type` - Best available payment type
//! - `POST /api/admin/payments/one-time` - Save a one-time payment
//! - `POST /api/admin/payments/periodical` - Save a periodical payment
//! - `POST /api/admin/payments/one-time/increase` - Add credits
//! - `POST /api/admin/payments/one-time/decrease` - Consume one credit
//! - `POST /api/admin/payments/reset` - Reset every payment of a type

pub mod dto;
mod handlers;
mod routes;

pub use routes::{payment_admin_routes, payment_routes};
