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

use crate::domain::messaging::{Broadcast, BroadcastView, Message};
use crate::error::WorkforceServiceError;
use crate::handlers::parse_query;
use crate::state::AppState;
use crate::usecase::messaging::{
    BroadcastInput, DeleteMessageUseCase, InboxUseCase, ListBroadcastsUseCase,
    MarkBroadcastReadUseCase, MarkMessageReadUseCase, SendBroadcastUseCase, SendMessageInput,
    SendMessageUseCase, SentMessagesUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub subject: String,
    pub body: String,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms_opt")]
    pub read_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            sender_id: m.sender_id,
            recipient_id: m.recipient_id,
            subject: m.subject,
            body: m.body,
            read_at: m.read_at,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct BroadcastResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub subject: String,
    pub body: String,
    pub target_roles: Vec<Role>,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms_opt")]
    pub read_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl BroadcastResponse {
    fn new(b: Broadcast, read_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id: b.id,
            sender_id: b.sender_id,
            subject: b.subject,
            body: b.body,
            target_roles: b.target_roles,
            read_at,
            created_at: b.created_at,
        }
    }
}

impl From<BroadcastView> for BroadcastResponse {
    fn from(view: BroadcastView) -> Self {
        Self::new(view.broadcast, view.read_at)
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub recipient_id: Uuid,
    pub subject: String,
    pub body: String,
}

#[derive(Deserialize)]
pub struct BroadcastRequest {
    pub subject: String,
    pub body: String,
    /// Empty or absent means every role.
    #[serde(default)]
    pub target_roles: Vec<Role>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PageQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl PageQuery {
    fn page(&self) -> PageRequest {
        PageRequest::new(self.per_page, self.page)
    }
}

// ── Direct messages ──────────────────────────────────────────────────────────

pub async fn send_message(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), WorkforceServiceError> {
    let uc = SendMessageUseCase {
        messages: state.message_repo(),
        staff: state.staff_repo(),
    };
    let message = uc
        .execute(
            SendMessageInput {
                recipient_id: body.recipient_id,
                subject: body.subject,
                body: body.body,
            },
            identity.user_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(message.into())))
}

pub async fn inbox(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<MessageResponse>>, WorkforceServiceError> {
    let query: PageQuery = parse_query(raw_query)?;
    let uc = InboxUseCase {
        messages: state.message_repo(),
    };
    let page = uc.execute(identity.user_id, query.page()).await?;
    Ok(Json(page.map(MessageResponse::from)))
}

pub async fn sent(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<MessageResponse>>, WorkforceServiceError> {
    let query: PageQuery = parse_query(raw_query)?;
    let uc = SentMessagesUseCase {
        messages: state.message_repo(),
    };
    let page = uc.execute(identity.user_id, query.page()).await?;
    Ok(Json(page.map(MessageResponse::from)))
}

pub async fn mark_message_read(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, WorkforceServiceError> {
    let uc = MarkMessageReadUseCase {
        messages: state.message_repo(),
    };
    let message = uc.execute(id, identity.user_id).await?;
    Ok(Json(message.into()))
}

pub async fn delete_message(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, WorkforceServiceError> {
    let uc = DeleteMessageUseCase {
        messages: state.message_repo(),
    };
    uc.execute(id, identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Broadcasts ───────────────────────────────────────────────────────────────

pub async fn send_broadcast(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<BroadcastRequest>,
) -> Result<(StatusCode, Json<BroadcastResponse>), WorkforceServiceError> {
    identity.require(Capability::Broadcast)?;
    let uc = SendBroadcastUseCase {
        broadcasts: state.broadcast_repo(),
    };
    let broadcast = uc
        .execute(
            BroadcastInput {
                subject: body.subject,
                body: body.body,
                target_roles: body.target_roles,
            },
            identity.user_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(BroadcastResponse::new(broadcast, None))))
}

pub async fn list_broadcasts(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<BroadcastResponse>>, WorkforceServiceError> {
    let query: PageQuery = parse_query(raw_query)?;
    let uc = ListBroadcastsUseCase {
        broadcasts: state.broadcast_repo(),
    };
    let page = uc.execute(identity, query.page()).await?;
    Ok(Json(page.map(BroadcastResponse::from)))
}

pub async fn mark_broadcast_read(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, WorkforceServiceError> {
    let uc = MarkBroadcastReadUseCase {
        broadcasts: state.broadcast_repo(),
    };
    uc.execute(id, identity).await?;
    Ok(StatusCode::NO_CONTENT)
}
