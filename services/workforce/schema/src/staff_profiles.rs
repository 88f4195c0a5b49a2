use sea_orm::entity::prelude::*;

/// Employment record, one-to-one with a user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "staff_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub employee_id: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub salary: Option<Decimal>,
    pub approval_status: String,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub location_id: Option<Uuid>,
    pub beat_id: Option<Uuid>,
    pub supervisor_id: Option<Uuid>,
    pub address: Option<String>,
    pub state_of_origin: Option<String>,
    pub date_of_birth: Option<Date>,
    pub next_of_kin_name: Option<String>,
    pub next_of_kin_phone: Option<String>,
    pub guarantor_name: Option<String>,
    pub guarantor_phone: Option<String>,
    pub registered_by: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::beats::Entity",
        from = "Column::BeatId",
        to = "super::beats::Column::Id"
    )]
    Beat,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::beats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Beat.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
