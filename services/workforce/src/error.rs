use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use guardpost_auth_types::identity::MissingCapability;

/// Workforce service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum WorkforceServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("staff member not found")]
    StaffNotFound,
    #[error("location not found")]
    LocationNotFound,
    #[error("beat not found")]
    BeatNotFound,
    #[error("assignment not found")]
    AssignmentNotFound,
    #[error("ledger entry not found")]
    LedgerEntryNotFound,
    #[error("message not found")]
    MessageNotFound,
    #[error("broadcast not found")]
    BroadcastNotFound,
    #[error("document not found")]
    DocumentNotFound,
    #[error("meeting not found")]
    MeetingNotFound,
    #[error("email already registered")]
    EmailAlreadyRegistered,
    #[error("staff member is not pending approval")]
    NotPending,
    #[error("beat is at capacity ({occupancy}/{required})")]
    CapacityExceeded { occupancy: u32, required: u32 },
    #[error("operator already has an active assignment")]
    OperatorAlreadyAssigned,
    #[error("assignment is not pending")]
    AssignmentNotPending,
    #[error("assignment is not active")]
    AssignmentNotActive,
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("invalid phone number")]
    InvalidPhone,
    #[error("salary must be greater than zero")]
    InvalidSalary,
    #[error("invalid date range")]
    InvalidDateRange,
    #[error("staff member is not approved")]
    StaffNotApproved,
    #[error("beat is inactive")]
    BeatInactive,
    #[error("invalid role")]
    InvalidRole,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl WorkforceServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::StaffNotFound => "STAFF_NOT_FOUND",
            Self::LocationNotFound => "LOCATION_NOT_FOUND",
            Self::BeatNotFound => "BEAT_NOT_FOUND",
            Self::AssignmentNotFound => "ASSIGNMENT_NOT_FOUND",
            Self::LedgerEntryNotFound => "LEDGER_ENTRY_NOT_FOUND",
            Self::MessageNotFound => "MESSAGE_NOT_FOUND",
            Self::BroadcastNotFound => "BROADCAST_NOT_FOUND",
            Self::DocumentNotFound => "DOCUMENT_NOT_FOUND",
            Self::MeetingNotFound => "MEETING_NOT_FOUND",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::NotPending => "NOT_PENDING",
            Self::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            Self::OperatorAlreadyAssigned => "OPERATOR_ALREADY_ASSIGNED",
            Self::AssignmentNotPending => "ASSIGNMENT_NOT_PENDING",
            Self::AssignmentNotActive => "ASSIGNMENT_NOT_ACTIVE",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidPhone => "INVALID_PHONE",
            Self::InvalidSalary => "INVALID_SALARY",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::StaffNotApproved => "STAFF_NOT_APPROVED",
            Self::BeatInactive => "BEAT_INACTIVE",
            Self::InvalidRole => "INVALID_ROLE",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound
            | Self::StaffNotFound
            | Self::LocationNotFound
            | Self::BeatNotFound
            | Self::AssignmentNotFound
            | Self::LedgerEntryNotFound
            | Self::MessageNotFound
            | Self::BroadcastNotFound
            | Self::DocumentNotFound
            | Self::MeetingNotFound => StatusCode::NOT_FOUND,
            Self::EmailAlreadyRegistered
            | Self::NotPending
            | Self::CapacityExceeded { .. }
            | Self::OperatorAlreadyAssigned
            | Self::AssignmentNotPending
            | Self::AssignmentNotActive => StatusCode::CONFLICT,
            Self::InvalidInput(_)
            | Self::InvalidPhone
            | Self::InvalidSalary
            | Self::InvalidDateRange
            | Self::StaffNotApproved
            | Self::BeatInactive
            | Self::InvalidRole
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MissingCapability> for WorkforceServiceError {
    fn from(_: MissingCapability) -> Self {
        Self::Forbidden
    }
}

impl IntoResponse for WorkforceServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::CapacityExceeded {
            occupancy,
            required,
        } = self
        {
            body["occupancy"] = occupancy.into();
            body["required"] = required.into();
        }
        (status, axum::Json(body)).into_response()
    }
}
