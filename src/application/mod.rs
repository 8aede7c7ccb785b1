//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).
//! Cross-cutting services live next to the handlers:
//!
//! - `ConfigurationStore` - versioned, reloadable portal settings
//! - `KeyedLocks` - per-user and per-event serialisation

mod configuration_store;
pub mod handlers;
mod keyed_locks;

pub use configuration_store::ConfigurationStore;
pub use keyed_locks::KeyedLocks;
