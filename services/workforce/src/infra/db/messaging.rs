use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Statement,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_domain::role::Role;
use guardpost_workforce_schema::{broadcast_reads, broadcasts, messages};

use crate::domain::messaging::{Broadcast, BroadcastView, Message, Party};
use crate::domain::repository::{BroadcastRepository, MessageRepository};
use crate::error::WorkforceServiceError;

use super::{role_containment, roles_from_json, roles_to_json};

// ── Direct messages ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMessageRepository {
    pub db: DatabaseConnection,
}

impl DbMessageRepository {
    async fn page_where(
        &self,
        party: Party,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Message>, WorkforceServiceError> {
        let query = match party {
            Party::Recipient => messages::Entity::find()
                .filter(messages::Column::RecipientId.eq(user_id))
                .filter(messages::Column::DeletedByRecipient.eq(false)),
            Party::Sender => messages::Entity::find()
                .filter(messages::Column::SenderId.eq(user_id))
                .filter(messages::Column::DeletedBySender.eq(false)),
        };
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count messages")?;
        let models = query
            .order_by_desc(messages::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list messages")?;
        Ok(Page::new(
            models.into_iter().map(message_from_model).collect(),
            page,
            total,
        ))
    }
}

impl MessageRepository for DbMessageRepository {
    async fn create(&self, message: &Message) -> Result<(), WorkforceServiceError> {
        messages::ActiveModel {
            id: Set(message.id),
            sender_id: Set(message.sender_id),
            recipient_id: Set(message.recipient_id),
            subject: Set(message.subject.clone()),
            body: Set(message.body.clone()),
            read_at: Set(message.read_at),
            deleted_by_sender: Set(message.deleted_by_sender),
            deleted_by_recipient: Set(message.deleted_by_recipient),
            created_at: Set(message.created_at),
        }
        .insert(&self.db)
        .await
        .context("create message")?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Message>, WorkforceServiceError> {
        let model = messages::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find message by id")?;
        Ok(model.map(message_from_model))
    }

    async fn inbox(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Message>, WorkforceServiceError> {
        self.page_where(Party::Recipient, user_id, page).await
    }

    async fn sent(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Message>, WorkforceServiceError> {
        self.page_where(Party::Sender, user_id, page).await
    }

    async fn mark_read(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), WorkforceServiceError> {
        messages::Entity::update_many()
            .col_expr(messages::Column::ReadAt, Expr::value(at))
            .filter(messages::Column::Id.eq(id))
            .filter(messages::Column::ReadAt.is_null())
            .exec(&self.db)
            .await
            .context("mark message read")?;
        Ok(())
    }

    async fn delete_for(&self, id: Uuid, party: Party) -> Result<(), WorkforceServiceError> {
        let column = match party {
            Party::Sender => messages::Column::DeletedBySender,
            Party::Recipient => messages::Column::DeletedByRecipient,
        };
        messages::Entity::update_many()
            .col_expr(column, Expr::value(true))
            .filter(messages::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete message for party")?;
        Ok(())
    }
}

fn message_from_model(model: messages::Model) -> Message {
    Message {
        id: model.id,
        sender_id: model.sender_id,
        recipient_id: model.recipient_id,
        subject: model.subject,
        body: model.body,
        read_at: model.read_at,
        deleted_by_sender: model.deleted_by_sender,
        deleted_by_recipient: model.deleted_by_recipient,
        created_at: model.created_at,
    }
}

// ── Broadcasts ───────────────────────────────────────────────────────────────

#[derive(Debug, FromQueryResult)]
struct BroadcastRow {
    id: Uuid,
    sender_id: Uuid,
    subject: String,
    body: String,
    target_roles: serde_json::Value,
    created_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    total: i64,
}

#[derive(Clone)]
pub struct DbBroadcastRepository {
    pub db: DatabaseConnection,
}

impl BroadcastRepository for DbBroadcastRepository {
    async fn create(&self, broadcast: &Broadcast) -> Result<(), WorkforceServiceError> {
        broadcasts::ActiveModel {
            id: Set(broadcast.id),
            sender_id: Set(broadcast.sender_id),
            subject: Set(broadcast.subject.clone()),
            body: Set(broadcast.body.clone()),
            target_roles: Set(roles_to_json(&broadcast.target_roles)),
            created_at: Set(broadcast.created_at),
        }
        .insert(&self.db)
        .await
        .context("create broadcast")?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Broadcast>, WorkforceServiceError> {
        let model = broadcasts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find broadcast by id")?;
        let Some(model) = model else {
            return Ok(None);
        };
        Ok(Some(Broadcast {
            id: model.id,
            sender_id: model.sender_id,
            subject: model.subject,
            body: model.body,
            target_roles: roles_from_json(model.target_roles)?,
            created_at: model.created_at,
        }))
    }

    async fn list_for(
        &self,
        user_id: Uuid,
        role: Role,
        page: PageRequest,
    ) -> Result<Page<BroadcastView>, WorkforceServiceError> {
        let backend = self.db.get_database_backend();
        let containment = role_containment(role);

        let total = CountRow::find_by_statement(Statement::from_sql_and_values(
            backend,
            r#"
            SELECT COUNT(*) AS total
            FROM broadcasts b
            WHERE b.target_roles = '[]'::jsonb OR b.target_roles @> $1::jsonb
            "#,
            [containment.clone().into()],
        ))
        .one(&self.db)
        .await
        .context("count broadcasts for role")?
        .map_or(0, |row| row.total);

        let rows = BroadcastRow::find_by_statement(Statement::from_sql_and_values(
            backend,
            r#"
            SELECT b.id, b.sender_id, b.subject, b.body, b.target_roles, b.created_at,
                   r.read_at
            FROM broadcasts b
            LEFT JOIN broadcast_reads r ON r.broadcast_id = b.id AND r.user_id = $1
            WHERE b.target_roles = '[]'::jsonb OR b.target_roles @> $2::jsonb
            ORDER BY b.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            [
                user_id.into(),
                containment.into(),
                i64::try_from(page.limit()).unwrap_or(i64::MAX).into(),
                i64::try_from(page.offset()).unwrap_or(i64::MAX).into(),
            ],
        ))
        .all(&self.db)
        .await
        .context("list broadcasts for role")?;

        let items = rows
            .into_iter()
            .map(|row| {
                Ok(BroadcastView {
                    broadcast: Broadcast {
                        id: row.id,
                        sender_id: row.sender_id,
                        subject: row.subject,
                        body: row.body,
                        target_roles: roles_from_json(row.target_roles)?,
                        created_at: row.created_at,
                    },
                    read_at: row.read_at,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Page::new(items, page, u64::try_from(total).unwrap_or_default()))
    }

    async fn mark_read(
        &self,
        id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), WorkforceServiceError> {
        broadcast_reads::Entity::insert(broadcast_reads::ActiveModel {
            broadcast_id: Set(id),
            user_id: Set(user_id),
            read_at: Set(at),
        })
        .on_conflict(
            OnConflict::columns([
                broadcast_reads::Column::BroadcastId,
                broadcast_reads::Column::UserId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .do_nothing()
        .exec(&self.db)
        .await
        .context("mark broadcast read")?;
        Ok(())
    }
}
