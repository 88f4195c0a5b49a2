use sea_orm::entity::prelude::*;

/// Money In / Money Out / Salary row. Edits append to `edit_history`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ledger_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub amount: Decimal,
    pub category: String,
    pub payment_method: String,
    pub description: String,
    pub reference: Option<String>,
    pub transaction_date: Date,
    pub staff_id: Option<Uuid>,
    pub salary_period: Option<String>,
    pub is_classified: bool,
    /// JSON array of `{edited_by, edited_at, before, after}` objects, oldest first.
    pub edit_history: Json,
    pub created_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
