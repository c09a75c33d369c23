//! Tests for the member registry service.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::MockMemberRepository;
use crate::domain::{ErrorCode, MemberId, MemberStatus};
use crate::test_support::FixedClock;

#[fixture]
fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 4, 30, 23, 30, 0)
            .single()
            .expect("valid fixture timestamp"),
    ))
}

fn new_member(registration_number: &str) -> NewMember {
    NewMember::try_from_parts("Ana Souza", registration_number, "STUDENT", None)
        .expect("valid member")
}

#[rstest]
#[tokio::test]
async fn register_dates_member_with_clock_utc_date(clock: Arc<dyn Clock>) {
    let mut repo = MockMemberRepository::new();
    repo.expect_insert()
        .withf(|_, registered_on| {
            *registered_on == NaiveDate::from_ymd_opt(2024, 4, 30).expect("valid date")
        })
        .times(1)
        .returning(|member, registered_on| {
            Ok(Member::from_new(MemberId::new(1), member.clone(), registered_on))
        });

    let service = MemberRegistryService::new(Arc::new(repo), clock);
    let member = service
        .register(new_member("88888"))
        .await
        .expect("member registered");

    assert_eq!(member.id, MemberId::new(1));
    assert_eq!(member.status, MemberStatus::Active);
}

#[rstest]
#[tokio::test]
async fn duplicate_registration_number_is_a_conflict(clock: Arc<dyn Clock>) {
    let mut repo = MockMemberRepository::new();
    repo.expect_insert().times(1).return_once(|_, _| {
        Err(MemberRepositoryError::duplicate_registration_number(
            "12345",
        ))
    });

    let service = MemberRegistryService::new(Arc::new(repo), clock);
    let err = service
        .register(new_member("12345"))
        .await
        .expect_err("duplicate rejected");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(
        err.details(),
        Some(&json!({
            "field": "registrationNumber",
            "code": "duplicate_registration_number",
        }))
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_email_is_a_conflict(clock: Arc<dyn Clock>) {
    let mut repo = MockMemberRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|_, _| Err(MemberRepositoryError::duplicate_email("ana@example.org")));

    let service = MemberRegistryService::new(Arc::new(repo), clock);
    let err = service
        .register(new_member("12345"))
        .await
        .expect_err("duplicate rejected");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert!(err.message().contains("ana@example.org"));
}

#[rstest]
#[case(MemberRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(MemberRepositoryError::query("boom"), ErrorCode::InternalError)]
#[case(MemberRepositoryError::constraint("members_name_check"), ErrorCode::InvalidRequest)]
#[tokio::test]
async fn list_maps_repository_failures(
    clock: Arc<dyn Clock>,
    #[case] failure: MemberRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockMemberRepository::new();
    repo.expect_list_newest_first()
        .times(1)
        .return_once(move || Err(failure));

    let service = MemberRegistryService::new(Arc::new(repo), clock);
    let err = service.list().await.expect_err("list fails");
    assert_eq!(err.code(), expected);
}
