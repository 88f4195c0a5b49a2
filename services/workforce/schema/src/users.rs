use sea_orm::entity::prelude::*;

/// Base identity of every staff member.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub status: String,
    pub photo_url: Option<String>,
    pub credential_hash: Option<String>,
    pub must_change_credential: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::staff_profiles::Entity")]
    StaffProfile,
    #[sea_orm(has_many = "super::documents::Entity")]
    Documents,
}

impl Related<super::staff_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StaffProfile.def()
    }
}

impl Related<super::documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
