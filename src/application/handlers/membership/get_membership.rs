//! GetMembershipHandler - Query handler for the current membership.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::membership::{Membership, MembershipError};
use crate::ports::MembershipRepository;

#[derive(Debug, Clone)]
pub struct GetMembershipQuery {
    pub user_id: UserId,
    /// Defaults to today.
    pub on: Option<NaiveDate>,
}

pub struct GetMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl GetMembershipHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    /// Membership granting access on the query date.
    pub async fn handle(&self, query: GetMembershipQuery) -> Result<Membership, MembershipError> {
        let on = query.on.unwrap_or_else(|| Timestamp::now().date());
        self.repository
            .find_by_user_id(&query.user_id)
            .await?
            .into_iter()
            .find(|m| m.is_active_on(on))
            .ok_or_else(|| MembershipError::not_found_for_user(query.user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMembershipRepository;
    use crate::domain::membership::MembershipType;
    use crate::domain::period::PeriodResult;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn returns_membership_covering_date() {
        let repo = InMemoryMembershipRepository::new();
        let user = UserId::new("diver-1").unwrap();
        let membership = Membership::create(
            user.clone(),
            MembershipType::Junior,
            PeriodResult {
                start_date: date(2024, 1, 1),
                end_date: date(2025, 1, 1),
            },
        );
        repo.save(&membership).await.unwrap();
        let handler = GetMembershipHandler::new(Arc::new(repo));

        let found = handler
            .handle(GetMembershipQuery {
                user_id: user.clone(),
                on: Some(date(2024, 6, 1)),
            })
            .await
            .unwrap();
        assert_eq!(found.id, membership.id);

        assert!(matches!(
            handler
                .handle(GetMembershipQuery {
                    user_id: user,
                    on: Some(date(2025, 1, 1)),
                })
                .await,
            Err(MembershipError::NotFoundForUser(_))
        ));
    }
}
