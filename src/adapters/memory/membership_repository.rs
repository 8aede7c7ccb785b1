//! In-memory membership repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, MembershipId, UserId};
use crate::domain::membership::Membership;
use crate::ports::MembershipRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipRepository {
    memberships: Arc<RwLock<HashMap<MembershipId, Membership>>>,
}

impl InMemoryMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn save(&self, membership: &Membership) -> Result<(), DomainError> {
        self.memberships
            .write()
            .await
            .insert(membership.id, membership.clone());
        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut memberships = self.memberships.write().await;
        match memberships.get_mut(&membership.id) {
            Some(stored) => {
                *stored = membership.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                format!("Membership not found: {}", membership.id),
            )),
        }
    }

    async fn update_all(&self, updated: &[Membership]) -> Result<(), DomainError> {
        let mut memberships = self.memberships.write().await;
        if let Some(missing) = updated.iter().find(|m| !memberships.contains_key(&m.id)) {
            return Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                format!("Membership not found: {}", missing.id),
            ));
        }
        for membership in updated {
            memberships.insert(membership.id, membership.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        Ok(self.memberships.read().await.get(id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Membership>, DomainError> {
        let memberships = self.memberships.read().await;
        let mut rows: Vec<Membership> = memberships
            .values()
            .filter(|m| &m.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(rows)
    }

    async fn find_overlapping(
        &self,
        user_id: &UserId,
        start: NaiveDate,
    ) -> Result<Vec<Membership>, DomainError> {
        let memberships = self.memberships.read().await;
        let mut rows: Vec<Membership> = memberships
            .values()
            .filter(|m| &m.user_id == user_id && m.overlaps_from(start))
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.start_date);
        Ok(rows)
    }

    async fn find_due_for_expiry(&self, today: NaiveDate) -> Result<Vec<Membership>, DomainError> {
        let memberships = self.memberships.read().await;
        Ok(memberships
            .values()
            .filter(|m| m.is_due_for_expiry(today))
            .cloned()
            .collect())
    }
}
