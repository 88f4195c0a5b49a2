use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use guardpost_domain::pagination::{Page, PageRequest};

use crate::domain::ledger::{
    GroupBy, LedgerEntry, LedgerFields, LedgerFilter, LedgerKind, LedgerPatch, LedgerReport,
    PaymentMethod, is_valid_salary_period,
};
use crate::domain::repository::{LedgerRepository, StaffRepository};
use crate::error::WorkforceServiceError;

fn check_amount(amount: Decimal) -> Result<Decimal, WorkforceServiceError> {
    if amount <= Decimal::ZERO {
        Err(WorkforceServiceError::InvalidInput(
            "amount must be greater than zero",
        ))
    } else {
        Ok(amount)
    }
}

fn check_range(filter: &LedgerFilter) -> Result<(), WorkforceServiceError> {
    match (filter.from, filter.to) {
        (Some(from), Some(to)) if from > to => Err(WorkforceServiceError::InvalidDateRange),
        _ => Ok(()),
    }
}

// ── RecordLedgerEntry ────────────────────────────────────────────────────────

pub struct RecordLedgerEntryInput {
    pub kind: LedgerKind,
    /// Optional for SALARY; defaults to the staff member's salary.
    pub amount: Option<Decimal>,
    pub category: String,
    pub payment_method: PaymentMethod,
    pub description: String,
    pub reference: Option<String>,
    pub transaction_date: NaiveDate,
    pub staff_id: Option<Uuid>,
    pub salary_period: Option<String>,
}

pub struct RecordLedgerEntryUseCase<L: LedgerRepository, S: StaffRepository> {
    pub ledger: L,
    pub staff: S,
}

impl<L: LedgerRepository, S: StaffRepository> RecordLedgerEntryUseCase<L, S> {
    pub async fn execute(
        &self,
        input: RecordLedgerEntryInput,
        created_by: Uuid,
    ) -> Result<LedgerEntry, WorkforceServiceError> {
        let mut category = input.category.trim().to_owned();
        let description = input.description.trim().to_owned();
        if description.is_empty() {
            return Err(WorkforceServiceError::InvalidInput(
                "description is required",
            ));
        }

        let amount = if input.kind == LedgerKind::Salary {
            let staff_id = input.staff_id.ok_or(WorkforceServiceError::MissingData)?;
            let period = input
                .salary_period
                .as_deref()
                .ok_or(WorkforceServiceError::MissingData)?;
            if !is_valid_salary_period(period) {
                return Err(WorkforceServiceError::InvalidInput(
                    "salary period must be YYYY-MM",
                ));
            }
            let member = self
                .staff
                .find(staff_id)
                .await?
                .ok_or(WorkforceServiceError::StaffNotFound)?;
            if !member.is_approved() {
                return Err(WorkforceServiceError::StaffNotApproved);
            }
            if category.is_empty() {
                category = "Salary".to_owned();
            }
            input
                .amount
                .or(member.profile.salary)
                .ok_or(WorkforceServiceError::MissingData)?
        } else {
            if input.staff_id.is_some() || input.salary_period.is_some() {
                return Err(WorkforceServiceError::InvalidInput(
                    "staff and salary period apply to salary entries only",
                ));
            }
            input.amount.ok_or(WorkforceServiceError::MissingData)?
        };
        if category.is_empty() {
            return Err(WorkforceServiceError::InvalidInput("category is required"));
        }

        let now = Utc::now();
        let entry = LedgerEntry {
            id: Uuid::now_v7(),
            kind: input.kind,
            fields: LedgerFields {
                amount: check_amount(amount)?,
                category,
                payment_method: input.payment_method,
                description,
                reference: input.reference,
                transaction_date: input.transaction_date,
                staff_id: input.staff_id,
                salary_period: input.salary_period,
            },
            is_classified: false,
            edit_history: vec![],
            created_by,
            created_at: now,
            updated_at: now,
        };
        self.ledger.create(&entry).await?;
        info!(
            entry_id = %entry.id,
            kind = %entry.kind,
            amount = %entry.fields.amount,
            created_by = %created_by,
            "ledger entry recorded"
        );
        Ok(entry)
    }
}

// ── EditLedgerEntry ──────────────────────────────────────────────────────────

pub struct EditLedgerEntryUseCase<L: LedgerRepository> {
    pub ledger: L,
}

impl<L: LedgerRepository> EditLedgerEntryUseCase<L> {
    pub async fn execute(
        &self,
        id: Uuid,
        patch: LedgerPatch,
        edited_by: Uuid,
        include_classified: bool,
    ) -> Result<LedgerEntry, WorkforceServiceError> {
        if patch.is_empty() {
            return Err(WorkforceServiceError::MissingData);
        }
        if let Some(amount) = patch.amount {
            check_amount(amount)?;
        }
        if patch.category.as_deref().is_some_and(|c| c.trim().is_empty())
            || patch
                .description
                .as_deref()
                .is_some_and(|d| d.trim().is_empty())
        {
            return Err(WorkforceServiceError::InvalidInput(
                "category and description cannot be blank",
            ));
        }
        if patch
            .salary_period
            .as_deref()
            .is_some_and(|p| !is_valid_salary_period(p))
        {
            return Err(WorkforceServiceError::InvalidInput(
                "salary period must be YYYY-MM",
            ));
        }

        let mut entry = self
            .ledger
            .find(id)
            .await?
            .filter(|e| include_classified || !e.is_classified)
            .ok_or(WorkforceServiceError::LedgerEntryNotFound)?;
        if entry.kind != LedgerKind::Salary && patch.salary_period.is_some() {
            return Err(WorkforceServiceError::InvalidInput(
                "staff and salary period apply to salary entries only",
            ));
        }
        if entry.replay().as_ref() != Some(&entry.fields) {
            return Err(anyhow::anyhow!(
                "ledger entry {id} edit history does not reproduce its fields"
            )
            .into());
        }
        entry.apply_edit(patch, edited_by, Utc::now());
        self.ledger.save_edit(&entry).await?;
        info!(
            entry_id = %id,
            edited_by = %edited_by,
            edits = entry.edit_history.len(),
            "ledger entry edited"
        );
        Ok(entry)
    }
}

// ── SetClassified ────────────────────────────────────────────────────────────

pub struct SetLedgerClassificationUseCase<L: LedgerRepository> {
    pub ledger: L,
}

impl<L: LedgerRepository> SetLedgerClassificationUseCase<L> {
    pub async fn execute(
        &self,
        id: Uuid,
        classified: bool,
        changed_by: Uuid,
    ) -> Result<LedgerEntry, WorkforceServiceError> {
        if !self.ledger.set_classified(id, classified).await? {
            return Err(WorkforceServiceError::LedgerEntryNotFound);
        }
        info!(entry_id = %id, classified, changed_by = %changed_by, "ledger classification changed");
        self.ledger
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::LedgerEntryNotFound)
    }
}

// ── Queries ──────────────────────────────────────────────────────────────────

pub struct GetLedgerEntryUseCase<L: LedgerRepository> {
    pub ledger: L,
}

impl<L: LedgerRepository> GetLedgerEntryUseCase<L> {
    pub async fn execute(
        &self,
        id: Uuid,
        include_classified: bool,
    ) -> Result<LedgerEntry, WorkforceServiceError> {
        self.ledger
            .find(id)
            .await?
            .filter(|e| include_classified || !e.is_classified)
            .ok_or(WorkforceServiceError::LedgerEntryNotFound)
    }
}

pub struct ListLedgerEntriesUseCase<L: LedgerRepository> {
    pub ledger: L,
}

impl<L: LedgerRepository> ListLedgerEntriesUseCase<L> {
    pub async fn execute(
        &self,
        filter: LedgerFilter,
        page: PageRequest,
    ) -> Result<Page<LedgerEntry>, WorkforceServiceError> {
        check_range(&filter)?;
        self.ledger.list(filter, page).await
    }
}

pub struct LedgerReportUseCase<L: LedgerRepository> {
    pub ledger: L,
}

impl<L: LedgerRepository> LedgerReportUseCase<L> {
    pub async fn execute(
        &self,
        filter: LedgerFilter,
        group_by: GroupBy,
        page: PageRequest,
    ) -> Result<LedgerReport, WorkforceServiceError> {
        check_range(&filter)?;
        let entries = self.ledger.list(filter, page).await?;
        let groups = self.ledger.totals(filter, group_by).await?;
        let grand_total = groups.iter().map(|g| g.total).sum();
        Ok(LedgerReport {
            entries,
            groups,
            grand_total,
        })
    }
}
