use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use guardpost_auth_types::identity::Identity;
use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_domain::role::Capability;

use crate::domain::ledger::{
    EditRecord, GroupBy, GroupTotal, LedgerEntry, LedgerFilter, LedgerKind, LedgerPatch,
    PaymentMethod,
};
use crate::error::WorkforceServiceError;
use crate::handlers::parse_query;
use crate::state::AppState;
use crate::usecase::ledger::{
    EditLedgerEntryUseCase, GetLedgerEntryUseCase, LedgerReportUseCase, ListLedgerEntriesUseCase,
    RecordLedgerEntryInput, RecordLedgerEntryUseCase, SetLedgerClassificationUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LedgerEntryResponse {
    pub id: Uuid,
    pub kind: LedgerKind,
    pub amount: Decimal,
    pub category: String,
    pub payment_method: PaymentMethod,
    pub description: String,
    pub reference: Option<String>,
    pub transaction_date: NaiveDate,
    pub staff_id: Option<Uuid>,
    pub salary_period: Option<String>,
    pub is_classified: bool,
    pub edit_history: Vec<EditRecord>,
    pub created_by: Uuid,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<LedgerEntry> for LedgerEntryResponse {
    fn from(e: LedgerEntry) -> Self {
        let f = e.fields;
        Self {
            id: e.id,
            kind: e.kind,
            amount: f.amount,
            category: f.category,
            payment_method: f.payment_method,
            description: f.description,
            reference: f.reference,
            transaction_date: f.transaction_date,
            staff_id: f.staff_id,
            salary_period: f.salary_period,
            is_classified: e.is_classified,
            edit_history: e.edit_history,
            created_by: e.created_by,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct LedgerReportResponse {
    pub entries: Page<LedgerEntryResponse>,
    pub groups: Vec<GroupTotal>,
    pub grand_total: Decimal,
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RecordEntryRequest {
    pub kind: LedgerKind,
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub category: String,
    pub payment_method: PaymentMethod,
    pub description: String,
    pub reference: Option<String>,
    pub transaction_date: NaiveDate,
    pub staff_id: Option<Uuid>,
    pub salary_period: Option<String>,
}

#[derive(Deserialize)]
pub struct EditEntryRequest {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub description: Option<String>,
    /// Absent leaves the reference unchanged; `null` clears it.
    #[serde(default, deserialize_with = "guardpost_core::serde::double_option")]
    pub reference: Option<Option<String>>,
    pub transaction_date: Option<NaiveDate>,
    pub salary_period: Option<String>,
}

#[derive(Deserialize)]
pub struct ClassificationRequest {
    pub classified: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct LedgerQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub kind: Option<LedgerKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub group_by: GroupBy,
}

impl LedgerQuery {
    fn filter(&self, identity: &Identity) -> LedgerFilter {
        LedgerFilter {
            kind: self.kind,
            from: self.from,
            to: self.to,
            include_classified: identity.can(Capability::ClassifyLedger),
        }
    }
}

// ── POST /ledger ─────────────────────────────────────────────────────────────

pub async fn record_entry(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<RecordEntryRequest>,
) -> Result<(StatusCode, Json<LedgerEntryResponse>), WorkforceServiceError> {
    identity.require(Capability::RecordLedger)?;
    let uc = RecordLedgerEntryUseCase {
        ledger: state.ledger_repo(),
        staff: state.staff_repo(),
    };
    let entry = uc
        .execute(
            RecordLedgerEntryInput {
                kind: body.kind,
                amount: body.amount,
                category: body.category,
                payment_method: body.payment_method,
                description: body.description,
                reference: body.reference,
                transaction_date: body.transaction_date,
                staff_id: body.staff_id,
                salary_period: body.salary_period,
            },
            identity.user_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

// ── GET /ledger ──────────────────────────────────────────────────────────────

pub async fn list_entries(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<LedgerEntryResponse>>, WorkforceServiceError> {
    identity.require(Capability::ViewLedger)?;
    let query: LedgerQuery = parse_query(raw_query)?;
    let uc = ListLedgerEntriesUseCase {
        ledger: state.ledger_repo(),
    };
    let page = uc
        .execute(
            query.filter(&identity),
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(page.map(LedgerEntryResponse::from)))
}

// ── GET /ledger/report ───────────────────────────────────────────────────────

pub async fn report(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<LedgerReportResponse>, WorkforceServiceError> {
    identity.require(Capability::ViewLedger)?;
    let query: LedgerQuery = parse_query(raw_query)?;
    let uc = LedgerReportUseCase {
        ledger: state.ledger_repo(),
    };
    let report = uc
        .execute(
            query.filter(&identity),
            query.group_by,
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(LedgerReportResponse {
        entries: report.entries.map(LedgerEntryResponse::from),
        groups: report.groups,
        grand_total: report.grand_total,
    }))
}

// ── GET /ledger/{id} ─────────────────────────────────────────────────────────

pub async fn get_entry(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LedgerEntryResponse>, WorkforceServiceError> {
    identity.require(Capability::ViewLedger)?;
    let uc = GetLedgerEntryUseCase {
        ledger: state.ledger_repo(),
    };
    let entry = uc
        .execute(id, identity.can(Capability::ClassifyLedger))
        .await?;
    Ok(Json(entry.into()))
}

// ── PATCH /ledger/{id} ───────────────────────────────────────────────────────

pub async fn edit_entry(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<EditEntryRequest>,
) -> Result<Json<LedgerEntryResponse>, WorkforceServiceError> {
    identity.require(Capability::RecordLedger)?;
    let uc = EditLedgerEntryUseCase {
        ledger: state.ledger_repo(),
    };
    let patch = LedgerPatch {
        amount: body.amount,
        category: body.category,
        payment_method: body.payment_method,
        description: body.description,
        reference: body.reference,
        transaction_date: body.transaction_date,
        salary_period: body.salary_period,
    };
    let entry = uc
        .execute(
            id,
            patch,
            identity.user_id,
            identity.can(Capability::ClassifyLedger),
        )
        .await?;
    Ok(Json(entry.into()))
}

// ── POST /ledger/{id}/classification ─────────────────────────────────────────

pub async fn set_classification(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ClassificationRequest>,
) -> Result<Json<LedgerEntryResponse>, WorkforceServiceError> {
    identity.require(Capability::ClassifyLedger)?;
    let uc = SetLedgerClassificationUseCase {
        ledger: state.ledger_repo(),
    };
    let entry = uc.execute(id, body.classified, identity.user_id).await?;
    Ok(Json(entry.into()))
}
