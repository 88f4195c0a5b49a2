use anyhow::Context as _;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
    sea_query::Expr,
};
use uuid::Uuid;

use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_workforce_schema::ledger_entries;

use crate::domain::ledger::{
    EditRecord, GroupBy, GroupTotal, LedgerEntry, LedgerFields, LedgerFilter,
};
use crate::domain::repository::LedgerRepository;
use crate::error::WorkforceServiceError;

#[derive(Debug, FromQueryResult)]
struct GroupRow {
    key: String,
    total: Option<Decimal>,
    count: i64,
}

fn filtered(filter: LedgerFilter) -> Select<ledger_entries::Entity> {
    let mut query = ledger_entries::Entity::find();
    if let Some(kind) = filter.kind {
        query = query.filter(ledger_entries::Column::Kind.eq(kind.as_str()));
    }
    if let Some(from) = filter.from {
        query = query.filter(ledger_entries::Column::TransactionDate.gte(from));
    }
    if let Some(to) = filter.to {
        query = query.filter(ledger_entries::Column::TransactionDate.lte(to));
    }
    if !filter.include_classified {
        query = query.filter(ledger_entries::Column::IsClassified.eq(false));
    }
    query
}

#[derive(Clone)]
pub struct DbLedgerRepository {
    pub db: DatabaseConnection,
}

impl LedgerRepository for DbLedgerRepository {
    async fn create(&self, entry: &LedgerEntry) -> Result<(), WorkforceServiceError> {
        entry_to_active_model(entry)?
            .insert(&self.db)
            .await
            .context("create ledger entry")?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<LedgerEntry>, WorkforceServiceError> {
        let model = ledger_entries::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ledger entry by id")?;
        Ok(model.map(entry_from_model).transpose()?)
    }

    async fn save_edit(&self, entry: &LedgerEntry) -> Result<(), WorkforceServiceError> {
        entry_to_active_model(entry)?
            .update(&self.db)
            .await
            .context("save ledger edit")?;
        Ok(())
    }

    async fn set_classified(
        &self,
        id: Uuid,
        classified: bool,
    ) -> Result<bool, WorkforceServiceError> {
        let result = ledger_entries::Entity::update_many()
            .col_expr(ledger_entries::Column::IsClassified, Expr::value(classified))
            .filter(ledger_entries::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set ledger classification")?;
        Ok(result.rows_affected > 0)
    }

    async fn list(
        &self,
        filter: LedgerFilter,
        page: PageRequest,
    ) -> Result<Page<LedgerEntry>, WorkforceServiceError> {
        let query = filtered(filter);
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count ledger entries")?;
        let models = query
            .order_by_desc(ledger_entries::Column::TransactionDate)
            .order_by_desc(ledger_entries::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list ledger entries")?;
        let items = models
            .into_iter()
            .map(entry_from_model)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Page::new(items, page, total))
    }

    async fn totals(
        &self,
        filter: LedgerFilter,
        group_by: GroupBy,
    ) -> Result<Vec<GroupTotal>, WorkforceServiceError> {
        let column = match group_by {
            GroupBy::PaymentMethod => ledger_entries::Column::PaymentMethod,
            GroupBy::Category => ledger_entries::Column::Category,
        };
        let rows = filtered(filter)
            .select_only()
            .column_as(column, "key")
            .column_as(Expr::col(ledger_entries::Column::Amount).sum(), "total")
            .column_as(Expr::col(ledger_entries::Column::Id).count(), "count")
            .group_by(column)
            .order_by_asc(column)
            .into_model::<GroupRow>()
            .all(&self.db)
            .await
            .context("sum ledger entries by group")?;
        Ok(rows
            .into_iter()
            .map(|row| GroupTotal {
                key: row.key,
                total: row.total.unwrap_or_default(),
                count: u64::try_from(row.count).unwrap_or_default(),
            })
            .collect())
    }
}

fn entry_to_active_model(entry: &LedgerEntry) -> anyhow::Result<ledger_entries::ActiveModel> {
    let fields = &entry.fields;
    Ok(ledger_entries::ActiveModel {
        id: Set(entry.id),
        kind: Set(entry.kind.as_str().to_owned()),
        amount: Set(fields.amount),
        category: Set(fields.category.clone()),
        payment_method: Set(fields.payment_method.as_str().to_owned()),
        description: Set(fields.description.clone()),
        reference: Set(fields.reference.clone()),
        transaction_date: Set(fields.transaction_date),
        staff_id: Set(fields.staff_id),
        salary_period: Set(fields.salary_period.clone()),
        is_classified: Set(entry.is_classified),
        edit_history: Set(
            serde_json::to_value(&entry.edit_history).context("encode edit history")?
        ),
        created_by: Set(entry.created_by),
        created_at: Set(entry.created_at),
        updated_at: Set(entry.updated_at),
    })
}

fn entry_from_model(model: ledger_entries::Model) -> anyhow::Result<LedgerEntry> {
    let edit_history: Vec<EditRecord> =
        serde_json::from_value(model.edit_history).context("decode edit history")?;
    Ok(LedgerEntry {
        id: model.id,
        kind: model.kind.parse().context("decode ledger kind")?,
        fields: LedgerFields {
            amount: model.amount,
            category: model.category,
            payment_method: model
                .payment_method
                .parse()
                .context("decode payment method")?,
            description: model.description,
            reference: model.reference,
            transaction_date: model.transaction_date,
            staff_id: model.staff_id,
            salary_period: model.salary_period,
        },
        is_classified: model.is_classified,
        edit_history,
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
