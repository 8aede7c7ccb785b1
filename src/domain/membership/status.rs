//! Membership status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Paid-up membership inside its period.
    Active,

    /// Member asked to stop. Access continues until period end.
    Cancelled,

    /// Period ended. No access.
    Expired,
}

impl MembershipStatus {
    /// Returns true if this status still grants access within the period.
    pub fn has_access(&self) -> bool {
        matches!(self, MembershipStatus::Active | MembershipStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "active",
            MembershipStatus::Cancelled => "cancelled",
            MembershipStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(MembershipStatus::Active),
            "cancelled" => Ok(MembershipStatus::Cancelled),
            "expired" => Ok(MembershipStatus::Expired),
            other => Err(format!("unknown membership status '{}'", other)),
        }
    }
}

impl StateMachine for MembershipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MembershipStatus::*;
        matches!(
            (self, target),
            (Active, Active) // Renewal
                | (Active, Cancelled)
                | (Active, Expired)
                | (Cancelled, Expired)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipStatus::*;
        match self {
            Active => vec![Active, Cancelled, Expired],
            Cancelled => vec![Expired],
            Expired => vec![],
        }
    }
}
