//! Payment ledger domain module.
//!
//! ONE_TIME credit balances and PERIODICAL date-range entitlements per user.

mod aggregate;
mod errors;
mod expiration;
mod status;
mod write_set;

pub use aggregate::{Payment, PaymentType};
pub use errors::PaymentError;
pub use expiration::{ExpirationPolicy, PaymentWindow, UnknownExpirationPolicy};
pub use status::PaymentStatus;
pub use write_set::PaymentWriteSet;
