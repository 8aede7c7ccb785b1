//! CreateMembershipHandler - Command handler for issuing memberships.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::application::{ConfigurationStore, KeyedLocks};
use crate::domain::configuration::keys::MEMBERSHIP_GROUP;
use crate::domain::configuration::PeriodSettings;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::membership::{Membership, MembershipError, MembershipType};
use crate::ports::MembershipRepository;

/// Command to create a membership.
#[derive(Debug, Clone)]
pub struct CreateMembershipCommand {
    pub user_id: UserId,
    pub membership_type: MembershipType,
    /// Date inside the period to cover. Defaults to today.
    pub reference_date: Option<NaiveDate>,
}

/// Handler for creating memberships.
///
/// The period comes from the `membership` grid. A user may hold only one
/// membership with access overlapping the new period start.
pub struct CreateMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
    config: Arc<ConfigurationStore>,
    locks: Arc<KeyedLocks<UserId>>,
}

impl CreateMembershipHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        config: Arc<ConfigurationStore>,
        locks: Arc<KeyedLocks<UserId>>,
    ) -> Self {
        Self {
            repository,
            config,
            locks,
        }
    }

    pub async fn handle(&self, cmd: CreateMembershipCommand) -> Result<Membership, MembershipError> {
        let _guard = self.locks.lock(&cmd.user_id).await;
        let reference = cmd.reference_date.unwrap_or_else(|| Timestamp::now().date());

        // 1. Compute the period
        let grid = PeriodSettings::load(&self.config.snapshot(), MEMBERSHIP_GROUP)?;
        let period = grid.period_containing(reference)?;

        // 2. Enforce a single overlapping membership
        let overlapping = self
            .repository
            .find_overlapping(&cmd.user_id, period.start_date)
            .await?;
        if let Some(current) = overlapping.into_iter().next() {
            tracing::debug!(
                "Membership {} of user {} overlaps period starting {}",
                current.id,
                cmd.user_id,
                period.start_date
            );
            return Err(MembershipError::conflict(current));
        }

        // 3. Persist
        let membership = Membership::create(cmd.user_id, cmd.membership_type, period);
        self.repository.save(&membership).await?;

        tracing::info!(
            "Created {} membership {} [{}, {})",
            membership.membership_type.as_str(),
            membership.id,
            membership.start_date,
            membership.end_date
        );
        Ok(membership)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryConfigurationRepository, InMemoryMembershipRepository};
    use crate::domain::configuration::ConfigurationSetting;
    use crate::domain::membership::MembershipStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn user() -> UserId {
        UserId::new("diver-1").unwrap()
    }

    async fn handler() -> (CreateMembershipHandler, InMemoryMembershipRepository) {
        let config = InMemoryConfigurationRepository::new(vec![
            ConfigurationSetting::new("membership", "unit", "years"),
            ConfigurationSetting::new("membership", "period-length", "3"),
            ConfigurationSetting::new("membership", "period-start-date", "2023-04-22"),
            ConfigurationSetting::new("membership", "period-start-point", "1"),
        ]);
        let store = ConfigurationStore::load(Arc::new(config)).await.unwrap();
        let repo = InMemoryMembershipRepository::new();
        let handler = CreateMembershipHandler::new(
            Arc::new(repo.clone()),
            Arc::new(store),
            Arc::new(KeyedLocks::new()),
        );
        (handler, repo)
    }

    fn cmd(reference: NaiveDate) -> CreateMembershipCommand {
        CreateMembershipCommand {
            user_id: user(),
            membership_type: MembershipType::Regular,
            reference_date: Some(reference),
        }
    }

    #[tokio::test]
    async fn membership_covers_grid_period() {
        let (handler, _) = handler().await;
        let membership = handler.handle(cmd(date(2024, 2, 6))).await.unwrap();

        assert_eq!(membership.status, MembershipStatus::Active);
        assert_eq!(membership.start_date, date(2023, 3, 1));
        assert_eq!(membership.end_date, date(2026, 3, 1));
    }

    #[tokio::test]
    async fn overlapping_membership_conflicts() {
        let (handler, repo) = handler().await;
        let first = handler.handle(cmd(date(2024, 2, 6))).await.unwrap();

        match handler.handle(cmd(date(2025, 1, 1))).await {
            Err(MembershipError::Conflict { existing }) => assert_eq!(existing.id, first.id),
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(repo.find_by_user_id(&user()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn next_period_is_allowed() {
        let (handler, repo) = handler().await;
        handler.handle(cmd(date(2024, 2, 6))).await.unwrap();
        let next = handler.handle(cmd(date(2026, 3, 1))).await.unwrap();

        assert_eq!(next.start_date, date(2026, 3, 1));
        assert_eq!(repo.find_by_user_id(&user()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn expired_membership_does_not_block_same_period() {
        let (handler, repo) = handler().await;
        let mut first = handler.handle(cmd(date(2024, 2, 6))).await.unwrap();
        first.expire().unwrap();
        repo.update(&first).await.unwrap();

        let again = handler.handle(cmd(date(2024, 2, 6))).await.unwrap();

        assert_ne!(again.id, first.id);
        assert_eq!(
            repo.find_overlapping(&user(), date(2023, 3, 1)).await.unwrap().len(),
            1
        );
    }
}
