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
use guardpost_domain::role::{Capability, Role};

use crate::domain::personnel::{
    ApprovalStatus, IssuedCredential, PersonalDetails, StaffFilter, StaffMember, UserStatus,
};
use crate::error::WorkforceServiceError;
use crate::handlers::parse_query;
use crate::state::AppState;
use crate::usecase::approval::{ApproveStaffUseCase, RejectStaffUseCase};
use crate::usecase::registration::{
    CreateStaffAccountInput, CreateStaffAccountUseCase, RegisterStaffInput, RegisterStaffUseCase,
};
use crate::usecase::staff::{GetStaffUseCase, ListStaffUseCase, SetUserStatusUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StaffResponse {
    pub id: Uuid,
    pub employee_id: String,
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub status: UserStatus,
    pub photo_url: Option<String>,
    pub must_change_credential: bool,
    pub approval_status: ApprovalStatus,
    pub salary: Option<Decimal>,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<Uuid>,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms_opt")]
    pub reviewed_at: Option<DateTime<Utc>>,
    pub location_id: Option<Uuid>,
    pub beat_id: Option<Uuid>,
    pub supervisor_id: Option<Uuid>,
    pub address: Option<String>,
    pub state_of_origin: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub next_of_kin_name: Option<String>,
    pub next_of_kin_phone: Option<String>,
    pub guarantor_name: Option<String>,
    pub guarantor_phone: Option<String>,
    pub registered_by: Option<Uuid>,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "guardpost_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<StaffMember> for StaffResponse {
    fn from(member: StaffMember) -> Self {
        let StaffMember { user, profile } = member;
        let details = profile.details;
        Self {
            id: user.id,
            employee_id: profile.employee_id,
            email: user.email,
            phone: user.phone,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            status: user.status,
            photo_url: user.photo_url,
            must_change_credential: user.must_change_credential,
            approval_status: profile.approval_status,
            salary: profile.salary,
            rejection_reason: profile.rejection_reason,
            reviewed_by: profile.reviewed_by,
            reviewed_at: profile.reviewed_at,
            location_id: profile.posting.location_id,
            beat_id: profile.posting.beat_id,
            supervisor_id: profile.posting.supervisor_id,
            address: details.address,
            state_of_origin: details.state_of_origin,
            date_of_birth: details.date_of_birth,
            next_of_kin_name: details.next_of_kin_name,
            next_of_kin_phone: details.next_of_kin_phone,
            guarantor_name: details.guarantor_name,
            guarantor_phone: details.guarantor_phone,
            registered_by: profile.registered_by,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// The temporary credential appears in this response and nowhere else.
#[derive(Serialize)]
pub struct IssuedCredentialResponse {
    pub staff: StaffResponse,
    pub temporary_credential: String,
}

impl From<IssuedCredential> for IssuedCredentialResponse {
    fn from(issued: IssuedCredential) -> Self {
        Self {
            staff: issued.member.into(),
            temporary_credential: issued.temporary_credential,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub photo_url: Option<String>,
    pub address: Option<String>,
    pub state_of_origin: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub next_of_kin_name: Option<String>,
    pub next_of_kin_phone: Option<String>,
    pub guarantor_name: Option<String>,
    pub guarantor_phone: Option<String>,
}

impl From<RegisterRequest> for RegisterStaffInput {
    fn from(body: RegisterRequest) -> Self {
        Self {
            email: body.email,
            phone: body.phone,
            first_name: body.first_name,
            last_name: body.last_name,
            role: body.role,
            photo_url: body.photo_url,
            details: PersonalDetails {
                address: body.address,
                state_of_origin: body.state_of_origin,
                date_of_birth: body.date_of_birth,
                next_of_kin_name: body.next_of_kin_name,
                next_of_kin_phone: body.next_of_kin_phone,
                guarantor_name: body.guarantor_name,
                guarantor_phone: body.guarantor_phone,
            },
        }
    }
}

#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub salary: Option<Decimal>,
}

#[derive(Deserialize)]
pub struct ApproveRequest {
    pub salary: Decimal,
}

#[derive(Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

#[derive(Deserialize)]
pub struct SetStatusRequest {
    pub status: UserStatus,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct StaffListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub role: Option<Role>,
    pub approval_status: Option<ApprovalStatus>,
}

// ── POST /registrations ──────────────────────────────────────────────────────

/// Public self-registration. No token required.
pub async fn register_self(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<StaffResponse>), WorkforceServiceError> {
    let uc = RegisterStaffUseCase {
        repo: state.staff_repo(),
    };
    let member = uc.execute(body.into(), None).await?;
    Ok((StatusCode::CREATED, Json(member.into())))
}

// ── POST /staff ──────────────────────────────────────────────────────────────

pub async fn register_staff(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<StaffResponse>), WorkforceServiceError> {
    identity.require(Capability::RegisterPersonnel)?;
    let uc = RegisterStaffUseCase {
        repo: state.staff_repo(),
    };
    let member = uc.execute(body.into(), Some(identity.user_id)).await?;
    Ok((StatusCode::CREATED, Json(member.into())))
}

// ── POST /staff/accounts ─────────────────────────────────────────────────────

pub async fn create_account(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<IssuedCredentialResponse>), WorkforceServiceError> {
    identity.require(Capability::ManageUsers)?;
    let uc = CreateStaffAccountUseCase {
        repo: state.staff_repo(),
    };
    let issued = uc
        .execute(
            CreateStaffAccountInput {
                email: body.email,
                phone: body.phone,
                first_name: body.first_name,
                last_name: body.last_name,
                role: body.role,
                salary: body.salary,
            },
            identity.user_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(issued.into())))
}

// ── GET /staff ───────────────────────────────────────────────────────────────

pub async fn list_staff(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<StaffResponse>>, WorkforceServiceError> {
    identity.require(Capability::ViewRoster)?;
    let query: StaffListQuery = parse_query(raw_query)?;
    let uc = ListStaffUseCase {
        repo: state.staff_repo(),
    };
    let page = uc
        .execute(
            StaffFilter {
                role: query.role,
                approval_status: query.approval_status,
            },
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(page.map(StaffResponse::from)))
}

// ── GET /staff/{id} ──────────────────────────────────────────────────────────

pub async fn get_staff(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StaffResponse>, WorkforceServiceError> {
    if identity.user_id != id {
        identity.require(Capability::ViewRoster)?;
    }
    let uc = GetStaffUseCase {
        repo: state.staff_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<StaffResponse>, WorkforceServiceError> {
    let uc = GetStaffUseCase {
        repo: state.staff_repo(),
    };
    Ok(Json(uc.execute(identity.user_id).await?.into()))
}

// ── POST /staff/{id}/approve ─────────────────────────────────────────────────

pub async fn approve_staff(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ApproveRequest>,
) -> Result<Json<IssuedCredentialResponse>, WorkforceServiceError> {
    identity.require(Capability::ReviewPersonnel)?;
    let uc = ApproveStaffUseCase {
        repo: state.staff_repo(),
        sms: state.sms.clone(),
    };
    let issued = uc.execute(id, body.salary, identity.user_id).await?;
    Ok(Json(issued.into()))
}

// ── POST /staff/{id}/reject ──────────────────────────────────────────────────

pub async fn reject_staff(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RejectRequest>,
) -> Result<Json<StaffResponse>, WorkforceServiceError> {
    identity.require(Capability::ReviewPersonnel)?;
    let uc = RejectStaffUseCase {
        repo: state.staff_repo(),
    };
    let member = uc.execute(id, &body.reason, identity.user_id).await?;
    Ok(Json(member.into()))
}

// ── PATCH /users/{id}/status ─────────────────────────────────────────────────

pub async fn set_user_status(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetStatusRequest>,
) -> Result<Json<StaffResponse>, WorkforceServiceError> {
    identity.require(Capability::ManageUsers)?;
    let uc = SetUserStatusUseCase {
        repo: state.staff_repo(),
    };
    let member = uc.execute(id, body.status, identity.user_id).await?;
    Ok(Json(member.into()))
}
