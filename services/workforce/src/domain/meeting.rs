use chrono::{DateTime, Utc};
use uuid::Uuid;

use guardpost_domain::role::Role;

/// A scheduled meeting. The room URL comes from an external video provider.
#[derive(Debug, Clone)]
pub struct Meeting {
    pub id: Uuid,
    pub title: String,
    pub agenda: Option<String>,
    pub scheduled_for: DateTime<Utc>,
    pub room_url: String,
    pub organizer_id: Uuid,
    /// Empty means every role.
    pub invited_roles: Vec<Role>,
    pub is_cancelled: bool,
    pub created_at: DateTime<Utc>,
}

impl Meeting {
    pub fn invites(&self, role: Role) -> bool {
        self.invited_roles.is_empty() || self.invited_roles.contains(&role)
    }
}
