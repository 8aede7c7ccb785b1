//! Membership lifecycle on the default yearly grid.

use std::sync::Arc;

use chrono::NaiveDate;

use dive_portal::adapters::memory::{
    InMemoryConfigurationRepository, InMemoryMembershipRepository,
};
use dive_portal::application::handlers::membership::{
    CancelMembershipCommand, CancelMembershipHandler, CreateMembershipCommand,
    CreateMembershipHandler, ExpireMembershipsCommand, ExpireMembershipsHandler,
    GetMembershipHandler, GetMembershipQuery,
};
use dive_portal::application::{ConfigurationStore, KeyedLocks};
use dive_portal::domain::foundation::UserId;
use dive_portal::domain::membership::{MembershipError, MembershipStatus, MembershipType};
use dive_portal::ports::MembershipRepository;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn diver() -> UserId {
    UserId::new("diver-7").unwrap()
}

fn create_for(reference: NaiveDate) -> CreateMembershipCommand {
    CreateMembershipCommand {
        user_id: diver(),
        membership_type: MembershipType::Regular,
        reference_date: Some(reference),
    }
}

#[tokio::test]
async fn membership_runs_from_creation_to_expiry() {
    let repository: Arc<dyn MembershipRepository> = Arc::new(InMemoryMembershipRepository::new());
    let config = Arc::new(
        ConfigurationStore::load(Arc::new(InMemoryConfigurationRepository::with_defaults()))
            .await
            .unwrap(),
    );
    let create =
        CreateMembershipHandler::new(repository.clone(), config, Arc::new(KeyedLocks::new()));
    let get = GetMembershipHandler::new(repository.clone());
    let cancel = CancelMembershipHandler::new(repository.clone());
    let expire = ExpireMembershipsHandler::new(repository);

    // 1. Created on the grid period containing the reference date
    let membership = create.handle(create_for(date(2024, 5, 1))).await.unwrap();
    assert_eq!(membership.start_date, date(2024, 1, 1));
    assert_eq!(membership.end_date, date(2025, 1, 1));

    let err = create.handle(create_for(date(2024, 9, 1))).await.unwrap_err();
    assert!(matches!(err, MembershipError::Conflict { .. }));

    // 2. Cancelled memberships keep access until the period ends
    let cancelled = cancel
        .handle(CancelMembershipCommand {
            user_id: diver(),
            on: Some(date(2024, 6, 1)),
        })
        .await
        .unwrap();
    assert_eq!(cancelled.effective_at, date(2025, 1, 1));
    let current = get
        .handle(GetMembershipQuery {
            user_id: diver(),
            on: Some(date(2024, 12, 31)),
        })
        .await
        .unwrap();
    assert_eq!(current.status, MembershipStatus::Cancelled);

    // 3. Expiry closes it and frees the next period
    let result = expire
        .handle(ExpireMembershipsCommand {
            today: Some(date(2025, 1, 1)),
        })
        .await
        .unwrap();
    assert_eq!(result.expired, 1);

    let gone = get
        .handle(GetMembershipQuery {
            user_id: diver(),
            on: Some(date(2024, 6, 1)),
        })
        .await
        .unwrap_err();
    assert!(matches!(gone, MembershipError::NotFoundForUser(_)));

    let next = create.handle(create_for(date(2025, 2, 1))).await.unwrap();
    assert_eq!(next.start_date, date(2025, 1, 1));
}
