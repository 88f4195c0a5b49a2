use sea_orm::entity::prelude::*;

/// Scheduled meeting. The room itself lives with the video provider.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "meetings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub agenda: Option<String>,
    pub scheduled_for: chrono::DateTime<chrono::Utc>,
    pub room_url: String,
    pub organizer_id: Uuid,
    /// JSON array of role names; empty means everyone.
    pub invited_roles: Json,
    pub is_cancelled: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
