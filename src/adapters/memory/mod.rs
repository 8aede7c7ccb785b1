//! In-process adapters for every port.
//!
//! Useful for testing and local development.

mod configuration_repository;
mod event_repository;
mod membership_repository;
mod notification_queue;
mod payment_repository;

pub use configuration_repository::InMemoryConfigurationRepository;
pub use event_repository::InMemoryEventRepository;
pub use membership_repository::InMemoryMembershipRepository;
pub use notification_queue::InMemoryNotificationQueue;
pub use payment_repository::InMemoryPaymentRepository;
