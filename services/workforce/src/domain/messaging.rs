use chrono::{DateTime, Utc};
use uuid::Uuid;

use guardpost_domain::role::Role;

/// Point-to-point message. Immutable except read state and the per-party delete flags.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub subject: String,
    pub body: String,
    pub read_at: Option<DateTime<Utc>>,
    pub deleted_by_sender: bool,
    pub deleted_by_recipient: bool,
    pub created_at: DateTime<Utc>,
}

/// Which side of a conversation a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Sender,
    Recipient,
}

impl Message {
    pub fn party(&self, user_id: Uuid) -> Option<Party> {
        if self.recipient_id == user_id {
            Some(Party::Recipient)
        } else if self.sender_id == user_id {
            Some(Party::Sender)
        } else {
            None
        }
    }

    pub fn is_visible_to(&self, user_id: Uuid) -> bool {
        match self.party(user_id) {
            Some(Party::Sender) => !self.deleted_by_sender,
            Some(Party::Recipient) => !self.deleted_by_recipient,
            None => false,
        }
    }
}

/// Message to every user whose role is in `target_roles`; empty means everyone.
#[derive(Debug, Clone)]
pub struct Broadcast {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub subject: String,
    pub body: String,
    pub target_roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

impl Broadcast {
    pub fn targets(&self, role: Role) -> bool {
        self.target_roles.is_empty() || self.target_roles.contains(&role)
    }
}

/// A broadcast together with the viewer's read receipt.
#[derive(Debug, Clone)]
pub struct BroadcastView {
    pub broadcast: Broadcast,
    pub read_at: Option<DateTime<Utc>>,
}
