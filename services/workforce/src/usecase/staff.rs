use tracing::info;
use uuid::Uuid;

use guardpost_domain::pagination::{Page, PageRequest};

use crate::domain::personnel::{ApprovalStatus, StaffFilter, StaffMember, UserStatus};
use crate::domain::repository::StaffRepository;
use crate::error::WorkforceServiceError;

pub struct GetStaffUseCase<R: StaffRepository> {
    pub repo: R,
}

impl<R: StaffRepository> GetStaffUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<StaffMember, WorkforceServiceError> {
        self.repo
            .find(user_id)
            .await?
            .ok_or(WorkforceServiceError::StaffNotFound)
    }
}

pub struct ListStaffUseCase<R: StaffRepository> {
    pub repo: R,
}

impl<R: StaffRepository> ListStaffUseCase<R> {
    pub async fn execute(
        &self,
        filter: StaffFilter,
        page: PageRequest,
    ) -> Result<Page<StaffMember>, WorkforceServiceError> {
        self.repo.list(filter, page).await
    }
}

/// Suspend, reactivate or deactivate an account. Accounts still awaiting
/// approval change status only through the approval workflow.
pub struct SetUserStatusUseCase<R: StaffRepository> {
    pub repo: R,
}

impl<R: StaffRepository> SetUserStatusUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        status: UserStatus,
        changed_by: Uuid,
    ) -> Result<StaffMember, WorkforceServiceError> {
        if status == UserStatus::Pending {
            return Err(WorkforceServiceError::InvalidInput(
                "status cannot be set to PENDING",
            ));
        }
        if user_id == changed_by {
            return Err(WorkforceServiceError::InvalidInput(
                "cannot change your own status",
            ));
        }
        let member = self
            .repo
            .find(user_id)
            .await?
            .ok_or(WorkforceServiceError::UserNotFound)?;
        if member.user.status == UserStatus::Pending {
            return Err(WorkforceServiceError::InvalidInput(
                "user is awaiting approval",
            ));
        }
        if status == UserStatus::Active
            && member.profile.approval_status == ApprovalStatus::Rejected
        {
            return Err(WorkforceServiceError::InvalidInput(
                "rejected applicants cannot be activated",
            ));
        }
        if member.user.status != status {
            self.repo.set_status(user_id, status).await?;
            info!(
                user_id = %user_id,
                from = %member.user.status,
                to = %status,
                changed_by = %changed_by,
                "user status changed"
            );
        }
        self.repo
            .find(user_id)
            .await?
            .ok_or(WorkforceServiceError::UserNotFound)
    }
}
