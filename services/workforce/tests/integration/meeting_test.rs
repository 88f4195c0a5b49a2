use chrono::{Duration, Utc};
use uuid::Uuid;

use guardpost_domain::pagination::PageRequest;
use guardpost_domain::role::Role;
use guardpost_workforce::error::WorkforceServiceError;
use guardpost_workforce::usecase::meeting::{
    CancelMeetingUseCase, ListMeetingsUseCase, ScheduleMeetingInput, ScheduleMeetingUseCase,
};

use crate::helpers::{MockMeetingRepo, identity};

fn review(invited_roles: Vec<Role>) -> ScheduleMeetingInput {
    ScheduleMeetingInput {
        title: "Monthly review".to_owned(),
        agenda: Some("Incidents, rota, uniforms".to_owned()),
        scheduled_for: Utc::now() + Duration::days(3),
        room_url: "https://meet.example.com/monthly-review".to_owned(),
        invited_roles,
    }
}

#[tokio::test]
async fn should_list_meeting_only_for_invited_roles() {
    let meetings = MockMeetingRepo::default();
    let organizer = identity(Role::Manager);
    ScheduleMeetingUseCase {
        meetings: meetings.clone(),
    }
    .execute(
        review(vec![Role::Supervisor, Role::GeneralSupervisor]),
        organizer.user_id,
    )
    .await
    .unwrap();

    let list = ListMeetingsUseCase { meetings };
    let supervisor = list
        .execute(identity(Role::Supervisor), PageRequest::default())
        .await
        .unwrap();
    let operator = list
        .execute(identity(Role::Operator), PageRequest::default())
        .await
        .unwrap();

    assert_eq!(supervisor.total, 1);
    assert_eq!(operator.total, 0);
}

#[tokio::test]
async fn should_reject_meeting_in_the_past() {
    let mut input = review(vec![]);
    input.scheduled_for = Utc::now() - Duration::hours(1);

    let result = ScheduleMeetingUseCase {
        meetings: MockMeetingRepo::default(),
    }
    .execute(input, Uuid::now_v7())
    .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::InvalidDateRange)),
        "expected InvalidDateRange, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_room_url_without_http_scheme() {
    let mut input = review(vec![]);
    input.room_url = "meet.example.com/room".to_owned();

    let result = ScheduleMeetingUseCase {
        meetings: MockMeetingRepo::default(),
    }
    .execute(input, Uuid::now_v7())
    .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::InvalidInput(_))),
        "expected InvalidInput, got {result:?}"
    );
}

#[tokio::test]
async fn should_let_organizer_cancel_and_hide_meeting() {
    let meetings = MockMeetingRepo::default();
    let organizer = identity(Role::GeneralSupervisor);
    let meeting = ScheduleMeetingUseCase {
        meetings: meetings.clone(),
    }
    .execute(review(vec![]), organizer.user_id)
    .await
    .unwrap();

    CancelMeetingUseCase {
        meetings: meetings.clone(),
    }
    .execute(meeting.id, organizer)
    .await
    .unwrap();

    let upcoming = ListMeetingsUseCase { meetings }
        .execute(identity(Role::Operator), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(upcoming.total, 0);
}

#[tokio::test]
async fn should_forbid_cancel_by_uninvolved_operator() {
    let meetings = MockMeetingRepo::default();
    let meeting = ScheduleMeetingUseCase {
        meetings: meetings.clone(),
    }
    .execute(review(vec![]), Uuid::now_v7())
    .await
    .unwrap();

    let result = CancelMeetingUseCase { meetings }
        .execute(meeting.id, identity(Role::Operator))
        .await;

    assert!(
        matches!(result, Err(WorkforceServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}
