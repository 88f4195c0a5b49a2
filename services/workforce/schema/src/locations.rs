use sea_orm::entity::prelude::*;

/// Client site that guards are posted to.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::beats::Entity")]
    Beats,
}

impl Related<super::beats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Beats.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
