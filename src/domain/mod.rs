//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `period` - Repeating calendar period arithmetic
//! - `configuration` - Runtime portal settings and their snapshot
//! - `payment` - ONE_TIME and PERIODICAL payment ledger types
//! - `event` - Events, participants and lifecycle notifications
//! - `membership` - Club membership lifecycle

pub mod configuration;
pub mod event;
pub mod foundation;
pub mod membership;
pub mod payment;
pub mod period;
