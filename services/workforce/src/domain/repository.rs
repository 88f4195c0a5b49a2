#![allow(async_fn_in_trait)]

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_domain::role::Role;

use crate::domain::assignment::{Assignment, AssignmentFilter};
use crate::domain::dashboard::DashboardSummary;
use crate::domain::document::Document;
use crate::domain::ledger::{GroupBy, GroupTotal, LedgerEntry, LedgerFilter};
use crate::domain::meeting::Meeting;
use crate::domain::messaging::{Broadcast, BroadcastView, Message, Party};
use crate::domain::personnel::{Approval, NewStaffMember, StaffFilter, StaffMember, UserStatus};
use crate::domain::site::{Beat, Location};
use crate::error::WorkforceServiceError;

/// Repository for users and their staff profiles.
pub trait StaffRepository: Send + Sync {
    async fn email_exists(&self, email: &str) -> Result<bool, WorkforceServiceError>;

    /// Insert user + profile in one transaction, allocating the next employee
    /// id for the role's prefix. Duplicate email → `EmailAlreadyRegistered`.
    async fn create(&self, member: &NewStaffMember) -> Result<StaffMember, WorkforceServiceError>;

    async fn find(&self, user_id: Uuid) -> Result<Option<StaffMember>, WorkforceServiceError>;

    async fn list(
        &self,
        filter: StaffFilter,
        page: PageRequest,
    ) -> Result<Page<StaffMember>, WorkforceServiceError>;

    /// PENDING → APPROVED and activate the user. Returns `false` if the
    /// profile was no longer PENDING.
    async fn approve(&self, approval: &Approval) -> Result<bool, WorkforceServiceError>;

    /// PENDING → REJECTED and deactivate the user. Returns `false` if the
    /// profile was no longer PENDING.
    async fn reject(
        &self,
        user_id: Uuid,
        reason: &str,
        reviewed_by: Uuid,
        reviewed_at: DateTime<Utc>,
    ) -> Result<bool, WorkforceServiceError>;

    async fn set_status(
        &self,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<(), WorkforceServiceError>;
}

pub trait LocationRepository: Send + Sync {
    async fn create(&self, location: &Location) -> Result<(), WorkforceServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<Location>, WorkforceServiceError>;
    async fn list(
        &self,
        active_only: bool,
        page: PageRequest,
    ) -> Result<Page<Location>, WorkforceServiceError>;
    async fn update(&self, location: &Location) -> Result<(), WorkforceServiceError>;
}

pub trait BeatRepository: Send + Sync {
    async fn create(&self, beat: &Beat) -> Result<(), WorkforceServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<Beat>, WorkforceServiceError>;
    async fn list(
        &self,
        location_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Page<Beat>, WorkforceServiceError>;
    async fn update(&self, beat: &Beat) -> Result<(), WorkforceServiceError>;
}

/// Repository for assignments. Status changes are conditional on the
/// expected current status and report whether a row changed.
pub trait AssignmentRepository: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<Assignment>, WorkforceServiceError>;

    async fn list(
        &self,
        filter: AssignmentFilter,
        page: PageRequest,
    ) -> Result<Page<Assignment>, WorkforceServiceError>;

    async fn find_active_for_operator(
        &self,
        operator_id: Uuid,
    ) -> Result<Option<Assignment>, WorkforceServiceError>;

    /// Number of ACTIVE assignments on a beat.
    async fn count_active_for_beat(&self, beat_id: Uuid) -> Result<u32, WorkforceServiceError>;

    /// Insert. An ACTIVE assignment also updates the operator's posting in the
    /// same transaction; a second ACTIVE one → `OperatorAlreadyAssigned`.
    async fn create(&self, assignment: &Assignment) -> Result<(), WorkforceServiceError>;

    /// PENDING → ACTIVE and update the operator's posting.
    async fn activate(
        &self,
        id: Uuid,
        reviewed_by: Uuid,
        capacity_override: bool,
        at: DateTime<Utc>,
    ) -> Result<bool, WorkforceServiceError>;

    /// PENDING → REJECTED.
    async fn reject(
        &self,
        id: Uuid,
        reviewed_by: Uuid,
        reason: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, WorkforceServiceError>;

    /// ACTIVE → ENDED and clear the operator's posting.
    async fn end(
        &self,
        id: Uuid,
        end_date: NaiveDate,
        at: DateTime<Utc>,
    ) -> Result<bool, WorkforceServiceError>;

    /// ACTIVE → TRANSFERRED plus insert of `replacement` (ACTIVE) in one
    /// transaction. The old row records `transferred_to`.
    async fn transfer(
        &self,
        id: Uuid,
        replacement: &Assignment,
    ) -> Result<bool, WorkforceServiceError>;
}

pub trait LedgerRepository: Send + Sync {
    async fn create(&self, entry: &LedgerEntry) -> Result<(), WorkforceServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<LedgerEntry>, WorkforceServiceError>;

    /// Persist visible fields and the full edit history.
    async fn save_edit(&self, entry: &LedgerEntry) -> Result<(), WorkforceServiceError>;

    async fn set_classified(
        &self,
        id: Uuid,
        classified: bool,
    ) -> Result<bool, WorkforceServiceError>;

    /// Newest transaction date first.
    async fn list(
        &self,
        filter: LedgerFilter,
        page: PageRequest,
    ) -> Result<Page<LedgerEntry>, WorkforceServiceError>;

    /// Sum and count per group over every matching row.
    async fn totals(
        &self,
        filter: LedgerFilter,
        group_by: GroupBy,
    ) -> Result<Vec<GroupTotal>, WorkforceServiceError>;
}

pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: &Message) -> Result<(), WorkforceServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<Message>, WorkforceServiceError>;
    async fn inbox(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Message>, WorkforceServiceError>;
    async fn sent(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Message>, WorkforceServiceError>;

    /// Stamp `read_at` unless already set.
    async fn mark_read(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), WorkforceServiceError>;

    /// Set the delete flag for one side only.
    async fn delete_for(&self, id: Uuid, party: Party) -> Result<(), WorkforceServiceError>;
}

pub trait BroadcastRepository: Send + Sync {
    async fn create(&self, broadcast: &Broadcast) -> Result<(), WorkforceServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<Broadcast>, WorkforceServiceError>;

    /// Broadcasts targeting `role` (or everyone) with `user_id`'s read state.
    async fn list_for(
        &self,
        user_id: Uuid,
        role: Role,
        page: PageRequest,
    ) -> Result<Page<BroadcastView>, WorkforceServiceError>;

    async fn mark_read(
        &self,
        id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), WorkforceServiceError>;
}

pub trait DocumentRepository: Send + Sync {
    async fn create(&self, document: &Document) -> Result<(), WorkforceServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<Document>, WorkforceServiceError>;
    async fn list(
        &self,
        owner_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Page<Document>, WorkforceServiceError>;

    /// Documents with an expiry on or before `until`, soonest first.
    async fn list_expiring(&self, until: NaiveDate) -> Result<Vec<Document>, WorkforceServiceError>;

    async fn delete(&self, id: Uuid) -> Result<bool, WorkforceServiceError>;
}

pub trait MeetingRepository: Send + Sync {
    async fn create(&self, meeting: &Meeting) -> Result<(), WorkforceServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<Meeting>, WorkforceServiceError>;

    /// Non-cancelled meetings after `after` that invite `role`, soonest first.
    async fn list_upcoming(
        &self,
        role: Role,
        after: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<Meeting>, WorkforceServiceError>;

    async fn cancel(&self, id: Uuid) -> Result<bool, WorkforceServiceError>;
}

pub trait DashboardQuery: Send + Sync {
    async fn summary(&self) -> Result<DashboardSummary, WorkforceServiceError>;
}

/// Outbound SMS. Callers treat failures as non-fatal.
pub trait SmsSender: Send + Sync {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), WorkforceServiceError>;
}
