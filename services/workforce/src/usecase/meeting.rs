use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use guardpost_auth_types::identity::Identity;
use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_domain::role::{Capability, Role};

use crate::domain::is_http_url;
use crate::domain::meeting::Meeting;
use crate::domain::repository::MeetingRepository;
use crate::error::WorkforceServiceError;

pub struct ScheduleMeetingInput {
    pub title: String,
    pub agenda: Option<String>,
    pub scheduled_for: DateTime<Utc>,
    pub room_url: String,
    pub invited_roles: Vec<Role>,
}

pub struct ScheduleMeetingUseCase<M: MeetingRepository> {
    pub meetings: M,
}

impl<M: MeetingRepository> ScheduleMeetingUseCase<M> {
    pub async fn execute(
        &self,
        input: ScheduleMeetingInput,
        organizer_id: Uuid,
    ) -> Result<Meeting, WorkforceServiceError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(WorkforceServiceError::InvalidInput("title is required"));
        }
        if !is_http_url(&input.room_url) {
            return Err(WorkforceServiceError::InvalidInput(
                "room url must be http(s)",
            ));
        }
        let now = Utc::now();
        if input.scheduled_for <= now {
            return Err(WorkforceServiceError::InvalidDateRange);
        }
        let mut invited_roles = input.invited_roles;
        invited_roles.sort_by_key(|r| r.as_str());
        invited_roles.dedup();
        let meeting = Meeting {
            id: Uuid::now_v7(),
            title: title.to_owned(),
            agenda: input.agenda,
            scheduled_for: input.scheduled_for,
            room_url: input.room_url,
            organizer_id,
            invited_roles,
            is_cancelled: false,
            created_at: now,
        };
        self.meetings.create(&meeting).await?;
        info!(
            meeting_id = %meeting.id,
            organizer_id = %organizer_id,
            scheduled_for = %meeting.scheduled_for,
            "meeting scheduled"
        );
        Ok(meeting)
    }
}

pub struct ListMeetingsUseCase<M: MeetingRepository> {
    pub meetings: M,
}

impl<M: MeetingRepository> ListMeetingsUseCase<M> {
    pub async fn execute(
        &self,
        caller: Identity,
        page: PageRequest,
    ) -> Result<Page<Meeting>, WorkforceServiceError> {
        self.meetings
            .list_upcoming(caller.role, Utc::now(), page)
            .await
    }
}

/// The organizer or any role allowed to schedule meetings may cancel.
pub struct CancelMeetingUseCase<M: MeetingRepository> {
    pub meetings: M,
}

impl<M: MeetingRepository> CancelMeetingUseCase<M> {
    pub async fn execute(&self, id: Uuid, caller: Identity) -> Result<(), WorkforceServiceError> {
        let meeting = self
            .meetings
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::MeetingNotFound)?;
        if meeting.organizer_id != caller.user_id && !caller.can(Capability::ScheduleMeetings) {
            return Err(WorkforceServiceError::Forbidden);
        }
        if meeting.is_cancelled {
            return Ok(());
        }
        self.meetings.cancel(id).await?;
        info!(meeting_id = %id, cancelled_by = %caller.user_id, "meeting cancelled");
        Ok(())
    }
}
