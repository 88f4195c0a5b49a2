//! Money In / Money Out / Salary ledger.
//!
//! Rows are never deleted. Every edit appends an [`EditRecord`] holding the
//! full field snapshot before and after the change, so the visible fields can
//! always be reproduced by replaying the history.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use guardpost_domain::pagination::Page;

use super::text_enum;

text_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum LedgerKind: "ledger kind" {
        MoneyIn => "MONEY_IN",
        MoneyOut => "MONEY_OUT",
        Salary => "SALARY",
    }
}

text_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum PaymentMethod: "payment method" {
        Cash => "CASH",
        BankTransfer => "BANK_TRANSFER",
        Cheque => "CHEQUE",
        Pos => "POS",
        Other => "OTHER",
    }
}

/// The editable part of a ledger row, also the snapshot stored in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFields {
    pub amount: Decimal,
    pub category: String,
    pub payment_method: PaymentMethod,
    pub description: String,
    pub reference: Option<String>,
    pub transaction_date: NaiveDate,
    pub staff_id: Option<Uuid>,
    pub salary_period: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    pub edited_by: Uuid,
    pub edited_at: DateTime<Utc>,
    pub before: LedgerFields,
    pub after: LedgerFields,
}

#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub kind: LedgerKind,
    pub fields: LedgerFields,
    pub is_classified: bool,
    pub edit_history: Vec<EditRecord>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct LedgerPatch {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub description: Option<String>,
    /// `Some(None)` clears the reference.
    pub reference: Option<Option<String>>,
    pub transaction_date: Option<NaiveDate>,
    /// Salary rows always carry a period, so it can be replaced but not cleared.
    pub salary_period: Option<String>,
}

impl LedgerPatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.payment_method.is_none()
            && self.description.is_none()
            && self.reference.is_none()
            && self.transaction_date.is_none()
            && self.salary_period.is_none()
    }
}

impl LedgerFields {
    fn patched(&self, patch: LedgerPatch) -> Self {
        Self {
            amount: patch.amount.unwrap_or(self.amount),
            category: patch.category.unwrap_or_else(|| self.category.clone()),
            payment_method: patch.payment_method.unwrap_or(self.payment_method),
            description: patch
                .description
                .unwrap_or_else(|| self.description.clone()),
            reference: patch.reference.unwrap_or_else(|| self.reference.clone()),
            transaction_date: patch.transaction_date.unwrap_or(self.transaction_date),
            staff_id: self.staff_id,
            salary_period: patch.salary_period.or_else(|| self.salary_period.clone()),
        }
    }
}

impl LedgerEntry {
    /// Apply `patch`, appending one history record. Returns the new fields.
    pub fn apply_edit(
        &mut self,
        patch: LedgerPatch,
        edited_by: Uuid,
        edited_at: DateTime<Utc>,
    ) -> &LedgerFields {
        let after = self.fields.patched(patch);
        self.edit_history.push(EditRecord {
            edited_by,
            edited_at,
            before: self.fields.clone(),
            after: after.clone(),
        });
        self.fields = after;
        self.updated_at = edited_at;
        &self.fields
    }

    /// Fields as originally recorded.
    pub fn original_fields(&self) -> &LedgerFields {
        self.edit_history
            .first()
            .map_or(&self.fields, |edit| &edit.before)
    }

    /// Replay the history from the first `before`. `None` if the chain is broken.
    pub fn replay(&self) -> Option<LedgerFields> {
        let mut current = self.original_fields().clone();
        for edit in &self.edit_history {
            if edit.before != current {
                return None;
            }
            current = edit.after.clone();
        }
        Some(current)
    }
}

/// `YYYY-MM`.
pub fn is_valid_salary_period(period: &str) -> bool {
    NaiveDate::parse_from_str(&format!("{period}-01"), "%Y-%m-%d").is_ok() && period.len() == 7
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupBy {
    #[default]
    PaymentMethod,
    Category,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerFilter {
    pub kind: Option<LedgerKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Classified rows are only visible to callers allowed to classify.
    pub include_classified: bool,
}

impl LedgerFilter {
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        let date = entry.fields.transaction_date;
        self.kind.is_none_or(|k| entry.kind == k)
            && self.from.is_none_or(|from| date >= from)
            && self.to.is_none_or(|to| date <= to)
            && (self.include_classified || !entry.is_classified)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: Decimal,
    pub count: u64,
}

#[derive(Debug, Clone)]
pub struct LedgerReport {
    pub entries: Page<LedgerEntry>,
    pub groups: Vec<GroupTotal>,
    pub grand_total: Decimal,
}
