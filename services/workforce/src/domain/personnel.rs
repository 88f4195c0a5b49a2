use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use guardpost_domain::role::Role;

use super::text_enum;

text_enum! {
    /// Account status of a user.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum UserStatus: "user status" {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Pending => "PENDING",
        Suspended => "SUSPENDED",
    }
}

text_enum! {
    /// Hiring approval state. Moves only PENDING → APPROVED or PENDING → REJECTED.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum ApprovalStatus: "approval status" {
        Pending => "PENDING",
        Approved => "APPROVED",
        Rejected => "REJECTED",
    }
}

/// Base identity of a staff member.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub status: UserStatus,
    pub photo_url: Option<String>,
    pub must_change_credential: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Personnel data captured on the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalDetails {
    pub address: Option<String>,
    pub state_of_origin: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub next_of_kin_name: Option<String>,
    pub next_of_kin_phone: Option<String>,
    pub guarantor_name: Option<String>,
    pub guarantor_phone: Option<String>,
}

/// Where an operator is currently posted. All three are set together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Posting {
    pub location_id: Option<Uuid>,
    pub beat_id: Option<Uuid>,
    pub supervisor_id: Option<Uuid>,
}

/// Employment record, one-to-one with a [`User`].
#[derive(Debug, Clone)]
pub struct StaffProfile {
    pub user_id: Uuid,
    pub employee_id: String,
    pub salary: Option<Decimal>,
    pub approval_status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub posting: Posting,
    pub details: PersonalDetails,
    pub registered_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StaffMember {
    pub user: User,
    pub profile: StaffProfile,
}

impl StaffMember {
    pub fn is_approved(&self) -> bool {
        self.profile.approval_status == ApprovalStatus::Approved
    }
}

/// A user + profile pair to insert. The employee id is allocated on insert.
#[derive(Debug, Clone)]
pub struct NewStaffMember {
    pub user: User,
    pub approval_status: ApprovalStatus,
    pub salary: Option<Decimal>,
    pub details: PersonalDetails,
    pub registered_by: Option<Uuid>,
    pub credential_hash: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StaffFilter {
    pub role: Option<Role>,
    pub approval_status: Option<ApprovalStatus>,
}

/// Fields written when a PENDING profile is approved.
#[derive(Debug, Clone)]
pub struct Approval {
    pub user_id: Uuid,
    pub salary: Decimal,
    pub credential_hash: String,
    pub reviewed_by: Uuid,
    pub reviewed_at: DateTime<Utc>,
}

/// Outcome of an approval or account creation: the one-time credential is
/// returned in plaintext exactly once.
#[derive(Debug, Clone)]
pub struct IssuedCredential {
    pub member: StaffMember,
    pub temporary_credential: String,
}

/// `OPR00001`-style employee id.
pub fn format_employee_id(prefix: &str, sequence: i64) -> String {
    format!("{prefix}{sequence:05}")
}
