//! Payment ledger handlers.
//!
//! ## Commands
//! - Saving one-time and periodical payments
//! - Increasing and decreasing one-time balances
//! - Bulk reset by payment type
//!
//! ## Queries
//! - Best available payment type
//! - Active payments with bound events

mod adjust_one_time_balance;
mod get_active_payments;
mod policy;
mod reset_payments;
mod resolve_payment_type;
mod save_one_time_payment;
mod save_period_payment;

// Commands
pub use adjust_one_time_balance::{
    DecreaseOneTimePaymentCommand, DecreaseOneTimePaymentHandler, IncreaseOneTimePaymentCommand,
    IncreaseOneTimePaymentHandler,
};
pub use reset_payments::{ResetPaymentsCommand, ResetPaymentsHandler, ResetPaymentsResult};
pub use save_one_time_payment::{
    SaveOneTimeOutcome, SaveOneTimePaymentCommand, SaveOneTimePaymentHandler,
    SaveOneTimePaymentResult,
};
pub use save_period_payment::{
    SavePeriodOutcome, SavePeriodPaymentCommand, SavePeriodPaymentHandler, SavePeriodPaymentResult,
};

// Queries
pub use get_active_payments::{
    BoundEvent, GetActivePaymentsHandler, GetActivePaymentsQuery, PaymentResponse,
};
pub use resolve_payment_type::{ResolvePaymentTypeHandler, ResolvePaymentTypeQuery};
