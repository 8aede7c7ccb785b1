//! Membership domain module.
//!
//! Club memberships tiled on the `membership` period grid, one active per user.
//!
//! # Module Structure
//!
//! - `aggregate` - Membership aggregate entity
//! - `status` - MembershipStatus state machine
//! - `kind` - MembershipType categories

mod aggregate;
mod errors;
mod kind;
mod status;

pub use aggregate::Membership;
pub use errors::MembershipError;
pub use kind::MembershipType;
pub use status::MembershipStatus;
