use sea_orm::entity::prelude::*;

/// Posting of an operator to a BEAT under a supervisor.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub operator_id: Uuid,
    pub supervisor_id: Uuid,
    pub beat_id: Uuid,
    pub location_id: Uuid,
    pub shift_type: String,
    pub assignment_type: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub status: String,
    pub created_by: Uuid,
    pub reviewed_by: Option<Uuid>,
    pub rejection_reason: Option<String>,
    pub capacity_override: bool,
    pub transferred_to: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::beats::Entity",
        from = "Column::BeatId",
        to = "super::beats::Column::Id"
    )]
    Beat,
}

impl Related<super::beats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Beat.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
