use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use guardpost_auth_types::identity::Identity;
use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_domain::role::{Capability, Role};

use crate::domain::meeting::Meeting;
use crate::error::WorkforceServiceError;
use crate::handlers::parse_query;
use crate::state::AppState;
use crate::usecase::meeting::{
    CancelMeetingUseCase, ListMeetingsUseCase, ScheduleMeetingInput, ScheduleMeetingUseCase,
};

#[derive(Serialize)]
pub struct MeetingResponse {
    pub id: Uuid,
    pub title: String,
    pub agenda: Option<String>,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub scheduled_for: DateTime<Utc>,
    pub room_url: String,
    pub organizer_id: Uuid,
    pub invited_roles: Vec<Role>,
    pub is_cancelled: bool,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Meeting> for MeetingResponse {
    fn from(m: Meeting) -> Self {
        Self {
            id: m.id,
            title: m.title,
            agenda: m.agenda,
            scheduled_for: m.scheduled_for,
            room_url: m.room_url,
            organizer_id: m.organizer_id,
            invited_roles: m.invited_roles,
            is_cancelled: m.is_cancelled,
            created_at: m.created_at,
        }
    }
}

#[derive(Deserialize)]
pub struct ScheduleMeetingRequest {
    pub title: String,
    pub agenda: Option<String>,
    pub scheduled_for: DateTime<Utc>,
    pub room_url: String,
    #[serde(default)]
    pub invited_roles: Vec<Role>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct MeetingListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn schedule_meeting(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ScheduleMeetingRequest>,
) -> Result<(StatusCode, Json<MeetingResponse>), WorkforceServiceError> {
    identity.require(Capability::ScheduleMeetings)?;
    let uc = ScheduleMeetingUseCase {
        meetings: state.meeting_repo(),
    };
    let meeting = uc
        .execute(
            ScheduleMeetingInput {
                title: body.title,
                agenda: body.agenda,
                scheduled_for: body.scheduled_for,
                room_url: body.room_url,
                invited_roles: body.invited_roles,
            },
            identity.user_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(meeting.into())))
}

/// Upcoming meetings that invite the caller's role.
pub async fn list_meetings(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<MeetingResponse>>, WorkforceServiceError> {
    let query: MeetingListQuery = parse_query(raw_query)?;
    let uc = ListMeetingsUseCase {
        meetings: state.meeting_repo(),
    };
    let page = uc
        .execute(identity, PageRequest::new(query.per_page, query.page))
        .await?;
    Ok(Json(page.map(MeetingResponse::from)))
}

pub async fn cancel_meeting(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, WorkforceServiceError> {
    let uc = CancelMeetingUseCase {
        meetings: state.meeting_repo(),
    };
    uc.execute(id, identity).await?;
    Ok(StatusCode::NO_CONTENT)
}
