use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use guardpost_domain::phone::{format_phone_number, is_e164};
use guardpost_domain::role::Role;

use crate::domain::credential::{generate_temporary_credential, hash_credential};
use crate::domain::personnel::{
    ApprovalStatus, IssuedCredential, NewStaffMember, PersonalDetails, StaffMember, User,
    UserStatus,
};
use crate::domain::repository::StaffRepository;
use crate::error::WorkforceServiceError;

pub struct RegisterStaffInput {
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub photo_url: Option<String>,
    pub details: PersonalDetails,
}

/// Validate and normalize the identity fields of a new user.
fn new_user(
    email: &str,
    phone: &str,
    first_name: &str,
    last_name: &str,
    role: Role,
    status: UserStatus,
    photo_url: Option<String>,
) -> Result<User, WorkforceServiceError> {
    let email = email.trim().to_lowercase();
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid_email {
        return Err(WorkforceServiceError::InvalidInput("email is invalid"));
    }
    let first_name = first_name.trim();
    let last_name = last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err(WorkforceServiceError::InvalidInput(
            "first and last name are required",
        ));
    }
    let phone = format_phone_number(phone);
    if !is_e164(&phone) {
        return Err(WorkforceServiceError::InvalidPhone);
    }
    let now = Utc::now();
    Ok(User {
        id: Uuid::now_v7(),
        email,
        phone,
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        role,
        status,
        photo_url,
        must_change_credential: false,
        created_at: now,
        updated_at: now,
    })
}

// ── RegisterStaff ────────────────────────────────────────────────────────────

/// Registers an operator or supervisor into the approval queue, either by
/// self-service (`registered_by` = `None`) or by office staff.
pub struct RegisterStaffUseCase<R: StaffRepository> {
    pub repo: R,
}

impl<R: StaffRepository> RegisterStaffUseCase<R> {
    pub async fn execute(
        &self,
        input: RegisterStaffInput,
        registered_by: Option<Uuid>,
    ) -> Result<StaffMember, WorkforceServiceError> {
        if !input.role.requires_approval() {
            return Err(WorkforceServiceError::InvalidRole);
        }
        let user = new_user(
            &input.email,
            &input.phone,
            &input.first_name,
            &input.last_name,
            input.role,
            UserStatus::Pending,
            input.photo_url,
        )?;
        if self.repo.email_exists(&user.email).await? {
            return Err(WorkforceServiceError::EmailAlreadyRegistered);
        }

        let member = self
            .repo
            .create(&NewStaffMember {
                user,
                approval_status: ApprovalStatus::Pending,
                salary: None,
                details: input.details,
                registered_by,
                credential_hash: None,
            })
            .await?;
        info!(
            user_id = %member.user.id,
            employee_id = %member.profile.employee_id,
            role = %member.user.role,
            registered_by = ?registered_by,
            "staff registered"
        );
        Ok(member)
    }
}

// ── CreateStaffAccount ───────────────────────────────────────────────────────

pub struct CreateStaffAccountInput {
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub salary: Option<Decimal>,
}

/// Creates an office/management account directly: ACTIVE, APPROVED, with a
/// temporary credential that must be changed on first sign-in.
pub struct CreateStaffAccountUseCase<R: StaffRepository> {
    pub repo: R,
}

impl<R: StaffRepository> CreateStaffAccountUseCase<R> {
    pub async fn execute(
        &self,
        input: CreateStaffAccountInput,
        created_by: Uuid,
    ) -> Result<IssuedCredential, WorkforceServiceError> {
        if input.role.requires_approval() {
            return Err(WorkforceServiceError::InvalidRole);
        }
        if input.salary.is_some_and(|s| s <= Decimal::ZERO) {
            return Err(WorkforceServiceError::InvalidSalary);
        }
        let mut user = new_user(
            &input.email,
            &input.phone,
            &input.first_name,
            &input.last_name,
            input.role,
            UserStatus::Active,
            None,
        )?;
        user.must_change_credential = true;
        if self.repo.email_exists(&user.email).await? {
            return Err(WorkforceServiceError::EmailAlreadyRegistered);
        }

        let credential = generate_temporary_credential();
        let member = self
            .repo
            .create(&NewStaffMember {
                user,
                approval_status: ApprovalStatus::Approved,
                salary: input.salary,
                details: PersonalDetails::default(),
                registered_by: Some(created_by),
                credential_hash: Some(hash_credential(&credential)?),
            })
            .await?;
        info!(
            user_id = %member.user.id,
            employee_id = %member.profile.employee_id,
            role = %member.user.role,
            created_by = %created_by,
            "staff account created"
        );
        Ok(IssuedCredential {
            member,
            temporary_credential: credential,
        })
    }
}
