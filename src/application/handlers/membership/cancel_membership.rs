//! CancelMembershipHandler - Command handler for cancelling memberships.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::membership::{Membership, MembershipError, MembershipStatus};
use crate::ports::MembershipRepository;

/// Command to cancel a membership.
#[derive(Debug, Clone)]
pub struct CancelMembershipCommand {
    pub user_id: UserId,
    /// Defaults to today.
    pub on: Option<NaiveDate>,
}

/// Result of successful membership cancellation.
#[derive(Debug, Clone, Serialize)]
pub struct CancelMembershipResult {
    pub membership: Membership,
    /// When access ends (exclusive period end).
    pub effective_at: NaiveDate,
}

/// Handler for cancelling memberships.
///
/// Cancellation takes effect at the end of the current period.
/// Users retain access until then.
pub struct CancelMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl CancelMembershipHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CancelMembershipCommand,
    ) -> Result<CancelMembershipResult, MembershipError> {
        let on = cmd.on.unwrap_or_else(|| Timestamp::now().date());

        // 1. Find the user's current membership
        let memberships = self.repository.find_by_user_id(&cmd.user_id).await?;
        let mut membership = match memberships.into_iter().find(|m| m.is_active_on(on)) {
            Some(m) if m.status == MembershipStatus::Active => m,
            Some(m) => return Err(MembershipError::invalid_state(m.status.as_str(), "cancel")),
            None => return Err(MembershipError::not_found_for_user(cmd.user_id)),
        };

        // 2. Cancel (domain logic)
        membership.cancel()?;

        // 3. Persist the update
        self.repository.update(&membership).await?;
        tracing::info!(
            "Cancelled membership {}, access until {}",
            membership.id,
            membership.end_date
        );

        let effective_at = membership.end_date;
        Ok(CancelMembershipResult {
            membership,
            effective_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode, MembershipId};
    use crate::domain::membership::MembershipType;
    use crate::domain::period::PeriodResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockMembershipRepository {
        memberships: Mutex<Vec<Membership>>,
        fail_update: bool,
    }

    impl MockMembershipRepository {
        fn new() -> Self {
            Self {
                memberships: Mutex::new(Vec::new()),
                fail_update: false,
            }
        }

        fn with_membership(membership: Membership) -> Self {
            Self {
                memberships: Mutex::new(vec![membership]),
                fail_update: false,
            }
        }

        fn failing_update(membership: Membership) -> Self {
            Self {
                memberships: Mutex::new(vec![membership]),
                fail_update: true,
            }
        }

        fn get_memberships(&self) -> Vec<Membership> {
            self.memberships.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MembershipRepository for MockMembershipRepository {
        async fn save(&self, membership: &Membership) -> Result<(), DomainError> {
            self.memberships.lock().unwrap().push(membership.clone());
            Ok(())
        }

        async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
            if self.fail_update {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated update failure",
                ));
            }
            let mut memberships = self.memberships.lock().unwrap();
            if let Some(m) = memberships.iter_mut().find(|m| m.id == membership.id) {
                *m = membership.clone();
            }
            Ok(())
        }

        async fn update_all(&self, memberships: &[Membership]) -> Result<(), DomainError> {
            for membership in memberships {
                self.update(membership).await?;
            }
            Ok(())
        }

        async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
            Ok(self
                .memberships
                .lock()
                .unwrap()
                .iter()
                .find(|m| &m.id == id)
                .cloned())
        }

        async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Membership>, DomainError> {
            Ok(self
                .memberships
                .lock()
                .unwrap()
                .iter()
                .filter(|m| &m.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn find_overlapping(
            &self,
            user_id: &UserId,
            start: NaiveDate,
        ) -> Result<Vec<Membership>, DomainError> {
            Ok(self
                .memberships
                .lock()
                .unwrap()
                .iter()
                .filter(|m| &m.user_id == user_id && m.overlaps_from(start))
                .cloned()
                .collect())
        }

        async fn find_due_for_expiry(
            &self,
            _today: NaiveDate,
        ) -> Result<Vec<Membership>, DomainError> {
            Ok(Vec::new())
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_user_id() -> UserId {
        UserId::new("test-user-123").unwrap()
    }

    fn active_membership() -> Membership {
        Membership::create(
            test_user_id(),
            MembershipType::Regular,
            PeriodResult {
                start_date: date(2024, 1, 1),
                end_date: date(2025, 1, 1),
            },
        )
    }

    fn cmd() -> CancelMembershipCommand {
        CancelMembershipCommand {
            user_id: test_user_id(),
            on: Some(date(2024, 6, 1)),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn cancels_active_membership_until_period_end() {
        let repo = Arc::new(MockMembershipRepository::with_membership(active_membership()));
        let handler = CancelMembershipHandler::new(repo.clone());

        let result = handler.handle(cmd()).await.unwrap();

        assert_eq!(result.effective_at, date(2025, 1, 1));
        assert_eq!(result.membership.status, MembershipStatus::Cancelled);
        let stored = repo.get_memberships();
        assert_eq!(stored[0].status, MembershipStatus::Cancelled);
        assert!(stored[0].cancelled_at.is_some());
        assert!(stored[0].is_active_on(date(2024, 12, 31)));
    }

    #[tokio::test]
    async fn fails_when_no_membership() {
        let handler = CancelMembershipHandler::new(Arc::new(MockMembershipRepository::new()));
        assert!(matches!(
            handler.handle(cmd()).await,
            Err(MembershipError::NotFoundForUser(_))
        ));
    }

    #[tokio::test]
    async fn fails_when_already_cancelled() {
        let mut membership = active_membership();
        membership.cancel().unwrap();
        let handler =
            CancelMembershipHandler::new(Arc::new(MockMembershipRepository::with_membership(membership)));

        assert!(matches!(
            handler.handle(cmd()).await,
            Err(MembershipError::InvalidState { .. })
        ));
    }

    #[tokio::test]
    async fn propagates_update_failure() {
        let handler = CancelMembershipHandler::new(Arc::new(
            MockMembershipRepository::failing_update(active_membership()),
        ));
        assert!(matches!(
            handler.handle(cmd()).await,
            Err(MembershipError::Infrastructure(_))
        ));
    }
}
