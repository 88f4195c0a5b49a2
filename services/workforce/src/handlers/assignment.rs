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

use crate::domain::assignment::{
    Assignment, AssignmentFilter, AssignmentStatus, AssignmentType, ShiftType,
};
use crate::error::WorkforceServiceError;
use crate::handlers::{parse_query, today};
use crate::state::AppState;
use crate::usecase::assignment::{
    ApproveAssignmentUseCase, CreateAssignmentInput, CreateAssignmentUseCase,
    EndAssignmentUseCase, GetAssignmentUseCase, ListAssignmentsUseCase, RejectAssignmentUseCase,
    TransferAssignmentInput, TransferAssignmentUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub operator_id: Uuid,
    pub supervisor_id: Uuid,
    pub beat_id: Uuid,
    pub location_id: Uuid,
    pub shift_type: ShiftType,
    pub assignment_type: AssignmentType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: AssignmentStatus,
    pub created_by: Uuid,
    pub reviewed_by: Option<Uuid>,
    pub rejection_reason: Option<String>,
    pub capacity_override: bool,
    pub transferred_to: Option<Uuid>,
    pub notes: Option<String>,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Assignment> for AssignmentResponse {
    fn from(a: Assignment) -> Self {
        Self {
            id: a.id,
            operator_id: a.operator_id,
            supervisor_id: a.supervisor_id,
            beat_id: a.beat_id,
            location_id: a.location_id,
            shift_type: a.shift_type,
            assignment_type: a.assignment_type,
            start_date: a.start_date,
            end_date: a.end_date,
            status: a.status,
            created_by: a.created_by,
            reviewed_by: a.reviewed_by,
            rejection_reason: a.rejection_reason,
            capacity_override: a.capacity_override,
            transferred_to: a.transferred_to,
            notes: a.notes,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateAssignmentRequest {
    pub operator_id: Uuid,
    pub supervisor_id: Uuid,
    pub beat_id: Uuid,
    pub shift_type: ShiftType,
    pub assignment_type: AssignmentType,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub override_capacity: bool,
    pub notes: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct ApproveAssignmentRequest {
    #[serde(default)]
    pub override_capacity: bool,
}

#[derive(Deserialize)]
pub struct RejectAssignmentRequest {
    pub reason: String,
}

#[derive(Deserialize, Default)]
pub struct EndAssignmentRequest {
    pub end_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct TransferAssignmentRequest {
    pub beat_id: Uuid,
    pub supervisor_id: Option<Uuid>,
    pub shift_type: Option<ShiftType>,
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub override_capacity: bool,
    pub notes: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AssignmentListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub status: Option<AssignmentStatus>,
    pub beat_id: Option<Uuid>,
    pub operator_id: Option<Uuid>,
    pub supervisor_id: Option<Uuid>,
}

// ── POST /assignments ────────────────────────────────────────────────────────

pub async fn create_assignment(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), WorkforceServiceError> {
    identity.require(Capability::CreateAssignment)?;
    let uc = CreateAssignmentUseCase {
        staff: state.staff_repo(),
        locations: state.location_repo(),
        beats: state.beat_repo(),
        assignments: state.assignment_repo(),
    };
    let assignment = uc
        .execute(
            CreateAssignmentInput {
                operator_id: body.operator_id,
                supervisor_id: body.supervisor_id,
                beat_id: body.beat_id,
                shift_type: body.shift_type,
                assignment_type: body.assignment_type,
                start_date: body.start_date,
                override_capacity: body.override_capacity,
                notes: body.notes,
            },
            identity,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(assignment.into())))
}

// ── GET /assignments ─────────────────────────────────────────────────────────

/// Callers without roster access only see their own assignments.
pub async fn list_assignments(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<AssignmentResponse>>, WorkforceServiceError> {
    let query: AssignmentListQuery = parse_query(raw_query)?;
    let mut filter = AssignmentFilter {
        status: query.status,
        beat_id: query.beat_id,
        operator_id: query.operator_id,
        supervisor_id: query.supervisor_id,
    };
    if !identity.can(Capability::ViewRoster) {
        filter.operator_id = Some(identity.user_id);
    }
    let uc = ListAssignmentsUseCase {
        assignments: state.assignment_repo(),
    };
    let page = uc
        .execute(filter, PageRequest::new(query.per_page, query.page))
        .await?;
    Ok(Json(page.map(AssignmentResponse::from)))
}

// ── GET /assignments/{id} ────────────────────────────────────────────────────

pub async fn get_assignment(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssignmentResponse>, WorkforceServiceError> {
    let uc = GetAssignmentUseCase {
        assignments: state.assignment_repo(),
    };
    let assignment = uc.execute(id).await?;
    if assignment.operator_id != identity.user_id {
        identity.require(Capability::ViewRoster)?;
    }
    Ok(Json(assignment.into()))
}

// ── POST /assignments/{id}/approve ───────────────────────────────────────────

pub async fn approve_assignment(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<ApproveAssignmentRequest>>,
) -> Result<Json<AssignmentResponse>, WorkforceServiceError> {
    identity.require(Capability::ReviewAssignment)?;
    let Json(body) = body.unwrap_or_default();
    let uc = ApproveAssignmentUseCase {
        locations: state.location_repo(),
        beats: state.beat_repo(),
        assignments: state.assignment_repo(),
    };
    let assignment = uc
        .execute(id, body.override_capacity, identity.user_id)
        .await?;
    Ok(Json(assignment.into()))
}

// ── POST /assignments/{id}/reject ────────────────────────────────────────────

pub async fn reject_assignment(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RejectAssignmentRequest>,
) -> Result<Json<AssignmentResponse>, WorkforceServiceError> {
    identity.require(Capability::ReviewAssignment)?;
    let uc = RejectAssignmentUseCase {
        assignments: state.assignment_repo(),
    };
    let assignment = uc.execute(id, &body.reason, identity.user_id).await?;
    Ok(Json(assignment.into()))
}

// ── POST /assignments/{id}/end ───────────────────────────────────────────────

pub async fn end_assignment(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<EndAssignmentRequest>>,
) -> Result<Json<AssignmentResponse>, WorkforceServiceError> {
    identity.require(Capability::ManageAssignments)?;
    let Json(body) = body.unwrap_or_default();
    let uc = EndAssignmentUseCase {
        assignments: state.assignment_repo(),
    };
    let assignment = uc.execute(id, body.end_date, today()).await?;
    Ok(Json(assignment.into()))
}

// ── POST /assignments/{id}/transfer ──────────────────────────────────────────

/// Returns the new ACTIVE assignment.
pub async fn transfer_assignment(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TransferAssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), WorkforceServiceError> {
    identity.require(Capability::ManageAssignments)?;
    let uc = TransferAssignmentUseCase {
        staff: state.staff_repo(),
        locations: state.location_repo(),
        beats: state.beat_repo(),
        assignments: state.assignment_repo(),
    };
    let assignment = uc
        .execute(
            id,
            TransferAssignmentInput {
                beat_id: body.beat_id,
                supervisor_id: body.supervisor_id,
                shift_type: body.shift_type,
                start_date: body.start_date,
                override_capacity: body.override_capacity,
                notes: body.notes,
            },
            identity.user_id,
            today(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(assignment.into())))
}
