//! ExpireMembershipsHandler - Rollover of memberships whose period ended.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::membership::MembershipError;
use crate::ports::MembershipRepository;

#[derive(Debug, Clone, Default)]
pub struct ExpireMembershipsCommand {
    /// Defaults to today.
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpireMembershipsResult {
    pub expired: usize,
}

pub struct ExpireMembershipsHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl ExpireMembershipsHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ExpireMembershipsCommand,
    ) -> Result<ExpireMembershipsResult, MembershipError> {
        let today = cmd.today.unwrap_or_else(|| Timestamp::now().date());

        let mut due = self.repository.find_due_for_expiry(today).await?;
        for membership in &mut due {
            membership.expire()?;
        }
        if !due.is_empty() {
            self.repository.update_all(&due).await?;
        }
        let expired = due.len();

        tracing::info!("Expired {} memberships ending on or before {}", expired, today);
        Ok(ExpireMembershipsResult { expired })
    }
}
