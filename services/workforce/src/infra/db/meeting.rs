use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};
use uuid::Uuid;

use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_domain::role::Role;
use guardpost_workforce_schema::meetings;

use crate::domain::meeting::Meeting;
use crate::domain::repository::MeetingRepository;
use crate::error::WorkforceServiceError;

use super::{role_containment, roles_from_json, roles_to_json};

#[derive(Clone)]
pub struct DbMeetingRepository {
    pub db: DatabaseConnection,
}

impl MeetingRepository for DbMeetingRepository {
    async fn create(&self, meeting: &Meeting) -> Result<(), WorkforceServiceError> {
        meetings::ActiveModel {
            id: Set(meeting.id),
            title: Set(meeting.title.clone()),
            agenda: Set(meeting.agenda.clone()),
            scheduled_for: Set(meeting.scheduled_for),
            room_url: Set(meeting.room_url.clone()),
            organizer_id: Set(meeting.organizer_id),
            invited_roles: Set(roles_to_json(&meeting.invited_roles)),
            is_cancelled: Set(meeting.is_cancelled),
            created_at: Set(meeting.created_at),
        }
        .insert(&self.db)
        .await
        .context("create meeting")?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Meeting>, WorkforceServiceError> {
        let model = meetings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find meeting by id")?;
        Ok(model.map(meeting_from_model).transpose()?)
    }

    async fn list_upcoming(
        &self,
        role: Role,
        after: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<Meeting>, WorkforceServiceError> {
        let query = meetings::Entity::find()
            .filter(meetings::Column::IsCancelled.eq(false))
            .filter(meetings::Column::ScheduledFor.gt(after))
            .filter(Expr::cust_with_values(
                "(invited_roles = '[]'::jsonb OR invited_roles @> $1::jsonb)",
                [role_containment(role)],
            ));
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count upcoming meetings")?;
        let models = query
            .order_by_asc(meetings::Column::ScheduledFor)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list upcoming meetings")?;
        let items = models
            .into_iter()
            .map(meeting_from_model)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Page::new(items, page, total))
    }

    async fn cancel(&self, id: Uuid) -> Result<bool, WorkforceServiceError> {
        let result = meetings::Entity::update_many()
            .col_expr(meetings::Column::IsCancelled, Expr::value(true))
            .filter(meetings::Column::Id.eq(id))
            .filter(meetings::Column::IsCancelled.eq(false))
            .exec(&self.db)
            .await
            .context("cancel meeting")?;
        Ok(result.rows_affected > 0)
    }
}

fn meeting_from_model(model: meetings::Model) -> anyhow::Result<Meeting> {
    Ok(Meeting {
        id: model.id,
        title: model.title,
        agenda: model.agenda,
        scheduled_for: model.scheduled_for,
        room_url: model.room_url,
        organizer_id: model.organizer_id,
        invited_roles: roles_from_json(model.invited_roles)?,
        is_cancelled: model.is_cancelled,
        created_at: model.created_at,
    })
}
