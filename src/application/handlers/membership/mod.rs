//! Membership handlers.
//!
//! ## Commands
//! - Creating memberships on the membership grid
//! - Cancelling memberships
//! - Expiring memberships whose period ended
//!
//! ## Queries
//! - Get the current membership

mod cancel_membership;
mod create_membership;
mod expire_memberships;
mod get_membership;

// Commands
pub use cancel_membership::{CancelMembershipCommand, CancelMembershipHandler, CancelMembershipResult};
pub use create_membership::{CreateMembershipCommand, CreateMembershipHandler};
pub use expire_memberships::{
    ExpireMembershipsCommand, ExpireMembershipsHandler, ExpireMembershipsResult,
};

// Queries
pub use get_membership::{GetMembershipHandler, GetMembershipQuery};
