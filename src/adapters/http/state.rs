//! Shared application state.

use std::sync::Arc;

use crate::application::handlers::event::{
    CancelEventHandler, CreateEventHandler, GetEventHandler, RecordDiveCountHandler,
    SubscribeToEventHandler, UnsubscribeFromEventHandler, UpdateEventHandler,
};
use crate::application::handlers::membership::{
    CancelMembershipHandler, CreateMembershipHandler, ExpireMembershipsHandler,
    GetMembershipHandler,
};
use crate::application::handlers::payment::{
    DecreaseOneTimePaymentHandler, GetActivePaymentsHandler, IncreaseOneTimePaymentHandler,
    ResetPaymentsHandler, ResolvePaymentTypeHandler, SaveOneTimePaymentHandler,
    SavePeriodPaymentHandler,
};
use crate::application::{ConfigurationStore, KeyedLocks};
use crate::domain::foundation::{EventId, UserId};
use crate::ports::{EventRepository, MembershipRepository, NotificationQueue, PaymentRepository};

/// Dependencies shared by every request.
///
/// Cloned per request; everything inside is Arc-wrapped. Handlers are
/// created on demand from the shared ports.
#[derive(Clone)]
pub struct AppState {
    pub payments: Arc<dyn PaymentRepository>,
    pub events: Arc<dyn EventRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub notifications: Arc<dyn NotificationQueue>,
    pub config: Arc<ConfigurationStore>,
    /// Serialises payment and membership writes per user.
    pub user_locks: Arc<KeyedLocks<UserId>>,
    /// Serialises participant writes per event.
    pub event_locks: Arc<KeyedLocks<EventId>>,
}

impl AppState {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        events: Arc<dyn EventRepository>,
        memberships: Arc<dyn MembershipRepository>,
        notifications: Arc<dyn NotificationQueue>,
        config: Arc<ConfigurationStore>,
    ) -> Self {
        Self {
            payments,
            events,
            memberships,
            notifications,
            config,
            user_locks: Arc::new(KeyedLocks::new()),
            event_locks: Arc::new(KeyedLocks::new()),
        }
    }

    // Payments

    pub fn active_payments_handler(&self) -> GetActivePaymentsHandler {
        GetActivePaymentsHandler::new(self.payments.clone(), self.events.clone())
    }

    pub fn payment_type_handler(&self) -> ResolvePaymentTypeHandler {
        ResolvePaymentTypeHandler::new(self.payments.clone())
    }

    pub fn save_one_time_handler(&self) -> SaveOneTimePaymentHandler {
        SaveOneTimePaymentHandler::new(
            self.payments.clone(),
            self.config.clone(),
            self.user_locks.clone(),
        )
    }

    pub fn save_period_handler(&self) -> SavePeriodPaymentHandler {
        SavePeriodPaymentHandler::new(
            self.payments.clone(),
            self.config.clone(),
            self.user_locks.clone(),
        )
    }

    pub fn increase_handler(&self) -> IncreaseOneTimePaymentHandler {
        IncreaseOneTimePaymentHandler::new(
            self.payments.clone(),
            self.config.clone(),
            self.user_locks.clone(),
        )
    }

    pub fn decrease_handler(&self) -> DecreaseOneTimePaymentHandler {
        DecreaseOneTimePaymentHandler::new(self.payments.clone(), self.user_locks.clone())
    }

    pub fn reset_handler(&self) -> ResetPaymentsHandler {
        ResetPaymentsHandler::new(self.payments.clone())
    }

    // Events

    pub fn create_event_handler(&self) -> CreateEventHandler {
        CreateEventHandler::new(
            self.events.clone(),
            self.config.clone(),
            self.notifications.clone(),
        )
    }

    pub fn get_event_handler(&self) -> GetEventHandler {
        GetEventHandler::new(self.events.clone())
    }

    pub fn update_event_handler(&self) -> UpdateEventHandler {
        UpdateEventHandler::new(
            self.events.clone(),
            self.config.clone(),
            self.notifications.clone(),
            Arc::new(self.payment_type_handler()),
            self.event_locks.clone(),
        )
    }

    pub fn cancel_event_handler(&self) -> CancelEventHandler {
        CancelEventHandler::new(
            self.events.clone(),
            self.notifications.clone(),
            self.event_locks.clone(),
        )
    }

    pub fn subscribe_handler(&self) -> SubscribeToEventHandler {
        SubscribeToEventHandler::new(
            self.events.clone(),
            Arc::new(self.payment_type_handler()),
            self.event_locks.clone(),
        )
    }

    pub fn unsubscribe_handler(&self) -> UnsubscribeFromEventHandler {
        UnsubscribeFromEventHandler::new(self.events.clone(), self.event_locks.clone())
    }

    pub fn dive_count_handler(&self) -> RecordDiveCountHandler {
        RecordDiveCountHandler::new(self.events.clone())
    }

    // Memberships

    pub fn get_membership_handler(&self) -> GetMembershipHandler {
        GetMembershipHandler::new(self.memberships.clone())
    }

    pub fn create_membership_handler(&self) -> CreateMembershipHandler {
        CreateMembershipHandler::new(
            self.memberships.clone(),
            self.config.clone(),
            self.user_locks.clone(),
        )
    }

    pub fn cancel_membership_handler(&self) -> CancelMembershipHandler {
        CancelMembershipHandler::new(self.memberships.clone())
    }

    pub fn expire_memberships_handler(&self) -> ExpireMembershipsHandler {
        ExpireMembershipsHandler::new(self.memberships.clone())
    }
}
