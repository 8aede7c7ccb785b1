//! HTTP adapter for event endpoints.
//!
//! - `POST /api/events` - Create an event
//! - `GET /api/events/:id` - Event with participants
//! - `PUT /api/events/:id` - Update details, status and participants
//! - `POST /api/events/:id/cancel` - Cancel
//! - `POST /api/events/:id/participants` - Subscribe the caller
//! - `DELETE /api/events/:id/participants` - Unsubscribe the caller
//! - `PUT /api/events/:id/participants/:user_id/dives` - Record dive count

pub mod dto;
mod handlers;
mod routes;

pub use routes::event_routes;
