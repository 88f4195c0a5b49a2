use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::credential::{generate_temporary_credential, hash_credential};
use crate::domain::personnel::{Approval, ApprovalStatus, IssuedCredential, StaffMember};
use crate::domain::repository::{SmsSender, StaffRepository};
use crate::error::WorkforceServiceError;

/// Upper bound on the approval SMS. The credential is returned either way.
pub const APPROVAL_SMS_TIMEOUT: Duration = Duration::from_secs(15);

// ── ApproveStaff ─────────────────────────────────────────────────────────────

pub struct ApproveStaffUseCase<R: StaffRepository, S: SmsSender> {
    pub repo: R,
    pub sms: S,
}

impl<R: StaffRepository, S: SmsSender> ApproveStaffUseCase<R, S> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        salary: Decimal,
        reviewed_by: Uuid,
    ) -> Result<IssuedCredential, WorkforceServiceError> {
        if salary <= Decimal::ZERO {
            return Err(WorkforceServiceError::InvalidSalary);
        }
        let member = self
            .repo
            .find(user_id)
            .await?
            .ok_or(WorkforceServiceError::StaffNotFound)?;
        if member.profile.approval_status != ApprovalStatus::Pending {
            return Err(WorkforceServiceError::NotPending);
        }

        let credential = generate_temporary_credential();
        let approval = Approval {
            user_id,
            salary,
            credential_hash: hash_credential(&credential)?,
            reviewed_by,
            reviewed_at: Utc::now(),
        };
        // Lost a race with a concurrent review.
        if !self.repo.approve(&approval).await? {
            return Err(WorkforceServiceError::NotPending);
        }
        info!(
            user_id = %user_id,
            employee_id = %member.profile.employee_id,
            reviewed_by = %reviewed_by,
            "staff approved"
        );

        let body = format!(
            "Welcome {}, your GuardPost account {} is approved. Temporary password: {}",
            member.user.first_name, member.profile.employee_id, credential
        );
        match tokio::time::timeout(
            APPROVAL_SMS_TIMEOUT,
            self.sms.send_sms(&member.user.phone, &body),
        )
        .await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(user_id = %user_id, error = %e, "approval sms not delivered"),
            Err(_) => warn!(
                user_id = %user_id,
                timeout_secs = APPROVAL_SMS_TIMEOUT.as_secs(),
                "approval sms timed out"
            ),
        }

        let member = self
            .repo
            .find(user_id)
            .await?
            .ok_or(WorkforceServiceError::StaffNotFound)?;
        Ok(IssuedCredential {
            member,
            temporary_credential: credential,
        })
    }
}

// ── RejectStaff ──────────────────────────────────────────────────────────────

pub struct RejectStaffUseCase<R: StaffRepository> {
    pub repo: R,
}

impl<R: StaffRepository> RejectStaffUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        reason: &str,
        reviewed_by: Uuid,
    ) -> Result<StaffMember, WorkforceServiceError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(WorkforceServiceError::InvalidInput(
                "rejection reason is required",
            ));
        }
        let member = self
            .repo
            .find(user_id)
            .await?
            .ok_or(WorkforceServiceError::StaffNotFound)?;
        if member.profile.approval_status != ApprovalStatus::Pending {
            return Err(WorkforceServiceError::NotPending);
        }
        if !self
            .repo
            .reject(user_id, reason, reviewed_by, Utc::now())
            .await?
        {
            return Err(WorkforceServiceError::NotPending);
        }
        info!(user_id = %user_id, reviewed_by = %reviewed_by, reason, "staff rejected");

        self.repo
            .find(user_id)
            .await?
            .ok_or(WorkforceServiceError::StaffNotFound)
    }
}
