//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod event;
pub mod membership;
pub mod payment;
