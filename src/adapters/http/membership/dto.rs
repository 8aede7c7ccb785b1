//! Request bodies for membership endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::membership::MembershipType;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMembershipRequest {
    pub user_id: String,
    pub membership_type: MembershipType,
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

/// `?today=YYYY-MM-DD` override.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpireMembershipsParams {
    pub today: Option<NaiveDate>,
}

