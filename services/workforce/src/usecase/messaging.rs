use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use guardpost_auth_types::identity::Identity;
use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_domain::role::Role;

use crate::domain::messaging::{Broadcast, BroadcastView, Message, Party};
use crate::domain::repository::{BroadcastRepository, MessageRepository, StaffRepository};
use crate::error::WorkforceServiceError;

fn subject_and_body(subject: &str, body: &str) -> Result<(String, String), WorkforceServiceError> {
    let subject = subject.trim();
    let body = body.trim();
    if subject.is_empty() || body.is_empty() {
        return Err(WorkforceServiceError::InvalidInput(
            "subject and body are required",
        ));
    }
    Ok((subject.to_owned(), body.to_owned()))
}

// ── Messages ─────────────────────────────────────────────────────────────────

pub struct SendMessageInput {
    pub recipient_id: Uuid,
    pub subject: String,
    pub body: String,
}

pub struct SendMessageUseCase<M: MessageRepository, S: StaffRepository> {
    pub messages: M,
    pub staff: S,
}

impl<M: MessageRepository, S: StaffRepository> SendMessageUseCase<M, S> {
    pub async fn execute(
        &self,
        input: SendMessageInput,
        sender_id: Uuid,
    ) -> Result<Message, WorkforceServiceError> {
        let (subject, body) = subject_and_body(&input.subject, &input.body)?;
        if self.staff.find(input.recipient_id).await?.is_none() {
            return Err(WorkforceServiceError::UserNotFound);
        }
        let message = Message {
            id: Uuid::now_v7(),
            sender_id,
            recipient_id: input.recipient_id,
            subject,
            body,
            read_at: None,
            deleted_by_sender: false,
            deleted_by_recipient: false,
            created_at: Utc::now(),
        };
        self.messages.create(&message).await?;
        info!(message_id = %message.id, sender_id = %sender_id, recipient_id = %message.recipient_id, "message sent");
        Ok(message)
    }
}

pub struct InboxUseCase<M: MessageRepository> {
    pub messages: M,
}

impl<M: MessageRepository> InboxUseCase<M> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Message>, WorkforceServiceError> {
        self.messages.inbox(user_id, page).await
    }
}

pub struct SentMessagesUseCase<M: MessageRepository> {
    pub messages: M,
}

impl<M: MessageRepository> SentMessagesUseCase<M> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Message>, WorkforceServiceError> {
        self.messages.sent(user_id, page).await
    }
}

/// Recipient only; marking an already-read message is a no-op.
pub struct MarkMessageReadUseCase<M: MessageRepository> {
    pub messages: M,
}

impl<M: MessageRepository> MarkMessageReadUseCase<M> {
    pub async fn execute(&self, id: Uuid, user_id: Uuid) -> Result<Message, WorkforceServiceError> {
        let message = self
            .messages
            .find(id)
            .await?
            .filter(|m| m.is_visible_to(user_id))
            .ok_or(WorkforceServiceError::MessageNotFound)?;
        if message.party(user_id) != Some(Party::Recipient) {
            return Err(WorkforceServiceError::Forbidden);
        }
        if message.read_at.is_some() {
            return Ok(message);
        }
        self.messages.mark_read(id, Utc::now()).await?;
        self.messages
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::MessageNotFound)
    }
}

/// Hides the message from the caller's side only.
pub struct DeleteMessageUseCase<M: MessageRepository> {
    pub messages: M,
}

impl<M: MessageRepository> DeleteMessageUseCase<M> {
    pub async fn execute(&self, id: Uuid, user_id: Uuid) -> Result<(), WorkforceServiceError> {
        let message = self
            .messages
            .find(id)
            .await?
            .filter(|m| m.is_visible_to(user_id))
            .ok_or(WorkforceServiceError::MessageNotFound)?;
        let party = message
            .party(user_id)
            .ok_or(WorkforceServiceError::MessageNotFound)?;
        self.messages.delete_for(id, party).await?;
        info!(message_id = %id, user_id = %user_id, ?party, "message deleted");
        Ok(())
    }
}

// ── Broadcasts ───────────────────────────────────────────────────────────────

pub struct BroadcastInput {
    pub subject: String,
    pub body: String,
    pub target_roles: Vec<Role>,
}

pub struct SendBroadcastUseCase<B: BroadcastRepository> {
    pub broadcasts: B,
}

impl<B: BroadcastRepository> SendBroadcastUseCase<B> {
    pub async fn execute(
        &self,
        input: BroadcastInput,
        sender_id: Uuid,
    ) -> Result<Broadcast, WorkforceServiceError> {
        let (subject, body) = subject_and_body(&input.subject, &input.body)?;
        let mut target_roles = input.target_roles;
        target_roles.sort_by_key(|r| r.as_str());
        target_roles.dedup();
        let broadcast = Broadcast {
            id: Uuid::now_v7(),
            sender_id,
            subject,
            body,
            target_roles,
            created_at: Utc::now(),
        };
        self.broadcasts.create(&broadcast).await?;
        info!(
            broadcast_id = %broadcast.id,
            sender_id = %sender_id,
            targets = ?broadcast.target_roles,
            "broadcast sent"
        );
        Ok(broadcast)
    }
}

pub struct ListBroadcastsUseCase<B: BroadcastRepository> {
    pub broadcasts: B,
}

impl<B: BroadcastRepository> ListBroadcastsUseCase<B> {
    pub async fn execute(
        &self,
        caller: Identity,
        page: PageRequest,
    ) -> Result<Page<BroadcastView>, WorkforceServiceError> {
        self.broadcasts
            .list_for(caller.user_id, caller.role, page)
            .await
    }
}

pub struct MarkBroadcastReadUseCase<B: BroadcastRepository> {
    pub broadcasts: B,
}

impl<B: BroadcastRepository> MarkBroadcastReadUseCase<B> {
    pub async fn execute(&self, id: Uuid, caller: Identity) -> Result<(), WorkforceServiceError> {
        let broadcast = self
            .broadcasts
            .find(id)
            .await?
            .filter(|b| b.targets(caller.role))
            .ok_or(WorkforceServiceError::BroadcastNotFound)?;
        self.broadcasts
            .mark_read(broadcast.id, caller.user_id, Utc::now())
            .await
    }
}
