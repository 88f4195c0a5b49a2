use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use guardpost_auth_types::identity::Identity;
use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_domain::role::Capability;

use crate::domain::document::{Document, ExpiryStatus};
use crate::error::WorkforceServiceError;
use crate::handlers::{parse_query, today};
use crate::state::AppState;
use crate::usecase::document::{
    CreateDocumentInput, CreateDocumentUseCase, DeleteDocumentUseCase,
    ListDocumentsUseCase, ListExpiringDocumentsUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub document_type: String,
    pub file_url: String,
    pub expires_on: Option<NaiveDate>,
    pub days_left: Option<i64>,
    pub expiry_status: ExpiryStatus,
    pub uploaded_by: Uuid,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl DocumentResponse {
    fn new(d: Document, today: NaiveDate, warning_days: u32) -> Self {
        Self {
            days_left: d.days_left(today),
            expiry_status: d.expiry_status(today, warning_days),
            id: d.id,
            owner_id: d.owner_id,
            title: d.title,
            document_type: d.document_type,
            file_url: d.file_url,
            expires_on: d.expires_on,
            uploaded_by: d.uploaded_by,
            created_at: d.created_at,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateDocumentRequest {
    pub owner_id: Uuid,
    pub title: String,
    pub document_type: String,
    pub file_url: String,
    pub expires_on: Option<NaiveDate>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct DocumentListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub owner_id: Option<Uuid>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ExpiringQuery {
    pub within_days: Option<u32>,
}

// ── POST /documents ──────────────────────────────────────────────────────────

pub async fn create_document(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), WorkforceServiceError> {
    identity.require(Capability::ManageDocuments)?;
    let uc = CreateDocumentUseCase {
        documents: state.document_repo(),
        staff: state.staff_repo(),
    };
    let document = uc
        .execute(
            CreateDocumentInput {
                owner_id: body.owner_id,
                title: body.title,
                document_type: body.document_type,
                file_url: body.file_url,
                expires_on: body.expires_on,
            },
            identity.user_id,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(DocumentResponse::new(
            document,
            today(),
            state.expiry_warning_days,
        )),
    ))
}

// ── GET /documents ───────────────────────────────────────────────────────────

/// Without `ManageDocuments` the caller only sees their own documents.
pub async fn list_documents(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<DocumentResponse>>, WorkforceServiceError> {
    let query: DocumentListQuery = parse_query(raw_query)?;
    let owner_id = if identity.can(Capability::ManageDocuments) {
        query.owner_id
    } else {
        match query.owner_id {
            Some(owner_id) if owner_id != identity.user_id => {
                return Err(WorkforceServiceError::Forbidden);
            }
            _ => Some(identity.user_id),
        }
    };
    let uc = ListDocumentsUseCase {
        documents: state.document_repo(),
    };
    let page = uc
        .execute(owner_id, PageRequest::new(query.per_page, query.page))
        .await?;
    let today = today();
    Ok(Json(page.map(|d| {
        DocumentResponse::new(d, today, state.expiry_warning_days)
    })))
}

// ── GET /documents/expiring ──────────────────────────────────────────────────

pub async fn list_expiring(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<DocumentResponse>>, WorkforceServiceError> {
    identity.require(Capability::ManageDocuments)?;
    let query: ExpiringQuery = parse_query(raw_query)?;
    let uc = ListExpiringDocumentsUseCase {
        documents: state.document_repo(),
        warning_days: state.expiry_warning_days,
    };
    let today = today();
    let documents = uc.execute(query.within_days, today).await?;
    Ok(Json(
        documents
            .into_iter()
            .map(|d| DocumentResponse::new(d, today, state.expiry_warning_days))
            .collect(),
    ))
}

// ── DELETE /documents/{id} ───────────────────────────────────────────────────

pub async fn delete_document(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, WorkforceServiceError> {
    identity.require(Capability::ManageDocuments)?;
    let uc = DeleteDocumentUseCase {
        documents: state.document_repo(),
    };
    uc.execute(id, identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
