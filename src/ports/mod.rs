//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `PaymentRepository` - Payment rows and atomic write sets
//! - `EventRepository` - Events and participant rows
//! - `MembershipRepository` - Membership aggregates
//! - `ConfigurationRepository` - Stored portal settings
//!
//! ## Side-Effect Ports
//!
//! - `NotificationQueue` - Fire-and-forget lifecycle notifications

mod configuration_repository;
mod event_repository;
mod membership_repository;
mod notification_queue;
mod payment_repository;

pub use configuration_repository::ConfigurationRepository;
pub use event_repository::EventRepository;
pub use membership_repository::MembershipRepository;
pub use notification_queue::NotificationQueue;
pub use payment_repository::PaymentRepository;
