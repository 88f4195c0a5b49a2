//! Assignment engine: posting operators to beats, with capacity tracking,
//! review, termination and transfer.

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use guardpost_auth_types::identity::Identity;
use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_domain::role::{Capability, Role};

use crate::domain::assignment::{
    Assignment, AssignmentFilter, AssignmentStatus, AssignmentType, ShiftType,
};
use crate::domain::personnel::{StaffMember, UserStatus};
use crate::domain::repository::{
    AssignmentRepository, BeatRepository, LocationRepository, StaffRepository,
};
use crate::domain::site::{Beat, Occupancy};
use crate::error::WorkforceServiceError;

async fn approved_operator<S: StaffRepository>(
    staff: &S,
    operator_id: Uuid,
) -> Result<StaffMember, WorkforceServiceError> {
    let operator = staff
        .find(operator_id)
        .await?
        .ok_or(WorkforceServiceError::StaffNotFound)?;
    if operator.user.role != Role::Operator {
        return Err(WorkforceServiceError::InvalidRole);
    }
    if !operator.is_approved() {
        return Err(WorkforceServiceError::StaffNotApproved);
    }
    if operator.user.status != UserStatus::Active {
        return Err(WorkforceServiceError::InvalidInput(
            "operator account is not active",
        ));
    }
    Ok(operator)
}

async fn approved_supervisor<S: StaffRepository>(
    staff: &S,
    supervisor_id: Uuid,
) -> Result<StaffMember, WorkforceServiceError> {
    let supervisor = staff
        .find(supervisor_id)
        .await?
        .ok_or(WorkforceServiceError::StaffNotFound)?;
    if !supervisor.user.role.is_supervisory() {
        return Err(WorkforceServiceError::InvalidRole);
    }
    if !supervisor.is_approved() {
        return Err(WorkforceServiceError::StaffNotApproved);
    }
    Ok(supervisor)
}

/// The beat and its location must both be active.
async fn open_beat<L: LocationRepository, B: BeatRepository>(
    locations: &L,
    beats: &B,
    beat_id: Uuid,
) -> Result<Beat, WorkforceServiceError> {
    let beat = beats
        .find(beat_id)
        .await?
        .ok_or(WorkforceServiceError::BeatNotFound)?;
    if !beat.is_active {
        return Err(WorkforceServiceError::BeatInactive);
    }
    let location = locations
        .find(beat.location_id)
        .await?
        .ok_or(WorkforceServiceError::LocationNotFound)?;
    if !location.is_active {
        return Err(WorkforceServiceError::BeatInactive);
    }
    Ok(beat)
}

/// Returns whether taking a slot crosses the headcount, i.e. whether the
/// override is being used. Full beat without override → `CapacityExceeded`.
async fn check_capacity<A: AssignmentRepository>(
    assignments: &A,
    beat: &Beat,
    override_capacity: bool,
) -> Result<bool, WorkforceServiceError> {
    let occupancy = Occupancy::new(
        assignments.count_active_for_beat(beat.id).await?,
        beat.number_of_operators,
    );
    if occupancy.is_full() && !override_capacity {
        return Err(WorkforceServiceError::CapacityExceeded {
            occupancy: occupancy.occupancy,
            required: occupancy.required,
        });
    }
    Ok(occupancy.is_full())
}

// ── CreateAssignment ─────────────────────────────────────────────────────────

pub struct CreateAssignmentInput {
    pub operator_id: Uuid,
    pub supervisor_id: Uuid,
    pub beat_id: Uuid,
    pub shift_type: ShiftType,
    pub assignment_type: AssignmentType,
    pub start_date: NaiveDate,
    pub override_capacity: bool,
    pub notes: Option<String>,
}

pub struct CreateAssignmentUseCase<S, L, B, A>
where
    S: StaffRepository,
    L: LocationRepository,
    B: BeatRepository,
    A: AssignmentRepository,
{
    pub staff: S,
    pub locations: L,
    pub beats: B,
    pub assignments: A,
}

impl<S, L, B, A> CreateAssignmentUseCase<S, L, B, A>
where
    S: StaffRepository,
    L: LocationRepository,
    B: BeatRepository,
    A: AssignmentRepository,
{
    pub async fn execute(
        &self,
        input: CreateAssignmentInput,
        caller: Identity,
    ) -> Result<Assignment, WorkforceServiceError> {
        let operator = approved_operator(&self.staff, input.operator_id).await?;
        let supervisor = approved_supervisor(&self.staff, input.supervisor_id).await?;
        let beat = open_beat(&self.locations, &self.beats, input.beat_id).await?;

        if self
            .assignments
            .find_active_for_operator(operator.user.id)
            .await?
            .is_some()
        {
            return Err(WorkforceServiceError::OperatorAlreadyAssigned);
        }
        let capacity_override =
            check_capacity(&self.assignments, &beat, input.override_capacity).await?;

        let auto_approve = caller.can(Capability::AutoApproveAssignment);
        let now = Utc::now();
        let assignment = Assignment {
            id: Uuid::now_v7(),
            operator_id: operator.user.id,
            supervisor_id: supervisor.user.id,
            beat_id: beat.id,
            location_id: beat.location_id,
            shift_type: input.shift_type,
            assignment_type: input.assignment_type,
            start_date: input.start_date,
            end_date: None,
            status: if auto_approve {
                AssignmentStatus::Active
            } else {
                AssignmentStatus::Pending
            },
            created_by: caller.user_id,
            reviewed_by: auto_approve.then_some(caller.user_id),
            rejection_reason: None,
            capacity_override,
            transferred_to: None,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        self.assignments.create(&assignment).await?;
        info!(
            assignment_id = %assignment.id,
            operator_id = %assignment.operator_id,
            beat_id = %assignment.beat_id,
            status = %assignment.status,
            capacity_override,
            "assignment created"
        );
        Ok(assignment)
    }
}

// ── ApproveAssignment ────────────────────────────────────────────────────────

pub struct ApproveAssignmentUseCase<L, B, A>
where
    L: LocationRepository,
    B: BeatRepository,
    A: AssignmentRepository,
{
    pub locations: L,
    pub beats: B,
    pub assignments: A,
}

impl<L, B, A> ApproveAssignmentUseCase<L, B, A>
where
    L: LocationRepository,
    B: BeatRepository,
    A: AssignmentRepository,
{
    pub async fn execute(
        &self,
        id: Uuid,
        override_capacity: bool,
        reviewed_by: Uuid,
    ) -> Result<Assignment, WorkforceServiceError> {
        let assignment = self
            .assignments
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::AssignmentNotFound)?;
        if assignment.status != AssignmentStatus::Pending {
            return Err(WorkforceServiceError::AssignmentNotPending);
        }
        if self
            .assignments
            .find_active_for_operator(assignment.operator_id)
            .await?
            .is_some()
        {
            return Err(WorkforceServiceError::OperatorAlreadyAssigned);
        }
        let beat = open_beat(&self.locations, &self.beats, assignment.beat_id).await?;
        let capacity_override =
            check_capacity(&self.assignments, &beat, override_capacity).await?;

        if !self
            .assignments
            .activate(id, reviewed_by, capacity_override, Utc::now())
            .await?
        {
            return Err(WorkforceServiceError::AssignmentNotPending);
        }
        info!(assignment_id = %id, reviewed_by = %reviewed_by, capacity_override, "assignment approved");
        self.assignments
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::AssignmentNotFound)
    }
}

// ── RejectAssignment ─────────────────────────────────────────────────────────

pub struct RejectAssignmentUseCase<A: AssignmentRepository> {
    pub assignments: A,
}

impl<A: AssignmentRepository> RejectAssignmentUseCase<A> {
    pub async fn execute(
        &self,
        id: Uuid,
        reason: &str,
        reviewed_by: Uuid,
    ) -> Result<Assignment, WorkforceServiceError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(WorkforceServiceError::InvalidInput(
                "rejection reason is required",
            ));
        }
        let assignment = self
            .assignments
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::AssignmentNotFound)?;
        if assignment.status != AssignmentStatus::Pending {
            return Err(WorkforceServiceError::AssignmentNotPending);
        }
        if !self
            .assignments
            .reject(id, reviewed_by, reason, Utc::now())
            .await?
        {
            return Err(WorkforceServiceError::AssignmentNotPending);
        }
        info!(assignment_id = %id, reviewed_by = %reviewed_by, "assignment rejected");
        self.assignments
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::AssignmentNotFound)
    }
}

// ── EndAssignment ────────────────────────────────────────────────────────────

pub struct EndAssignmentUseCase<A: AssignmentRepository> {
    pub assignments: A,
}

impl<A: AssignmentRepository> EndAssignmentUseCase<A> {
    /// `end_date` defaults to `today`.
    pub async fn execute(
        &self,
        id: Uuid,
        end_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Assignment, WorkforceServiceError> {
        let assignment = self
            .assignments
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::AssignmentNotFound)?;
        if assignment.status != AssignmentStatus::Active {
            return Err(WorkforceServiceError::AssignmentNotActive);
        }
        let end_date = end_date.unwrap_or(today);
        if end_date < assignment.start_date {
            return Err(WorkforceServiceError::InvalidDateRange);
        }
        if !self.assignments.end(id, end_date, Utc::now()).await? {
            return Err(WorkforceServiceError::AssignmentNotActive);
        }
        info!(assignment_id = %id, operator_id = %assignment.operator_id, %end_date, "assignment ended");
        self.assignments
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::AssignmentNotFound)
    }
}

// ── TransferAssignment ───────────────────────────────────────────────────────

pub struct TransferAssignmentInput {
    pub beat_id: Uuid,
    pub supervisor_id: Option<Uuid>,
    pub shift_type: Option<ShiftType>,
    pub start_date: Option<NaiveDate>,
    pub override_capacity: bool,
    pub notes: Option<String>,
}

pub struct TransferAssignmentUseCase<S, L, B, A>
where
    S: StaffRepository,
    L: LocationRepository,
    B: BeatRepository,
    A: AssignmentRepository,
{
    pub staff: S,
    pub locations: L,
    pub beats: B,
    pub assignments: A,
}

impl<S, L, B, A> TransferAssignmentUseCase<S, L, B, A>
where
    S: StaffRepository,
    L: LocationRepository,
    B: BeatRepository,
    A: AssignmentRepository,
{
    /// Returns the new ACTIVE assignment.
    pub async fn execute(
        &self,
        id: Uuid,
        input: TransferAssignmentInput,
        caller: Uuid,
        today: NaiveDate,
    ) -> Result<Assignment, WorkforceServiceError> {
        let current = self
            .assignments
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::AssignmentNotFound)?;
        if current.status != AssignmentStatus::Active {
            return Err(WorkforceServiceError::AssignmentNotActive);
        }
        if current.beat_id == input.beat_id {
            return Err(WorkforceServiceError::InvalidInput(
                "assignment is already on this beat",
            ));
        }
        let start_date = input.start_date.unwrap_or(today);
        if start_date < current.start_date {
            return Err(WorkforceServiceError::InvalidDateRange);
        }
        let supervisor_id = input.supervisor_id.unwrap_or(current.supervisor_id);
        approved_supervisor(&self.staff, supervisor_id).await?;
        let beat = open_beat(&self.locations, &self.beats, input.beat_id).await?;
        let capacity_override =
            check_capacity(&self.assignments, &beat, input.override_capacity).await?;

        let now = Utc::now();
        let replacement = Assignment {
            id: Uuid::now_v7(),
            operator_id: current.operator_id,
            supervisor_id,
            beat_id: beat.id,
            location_id: beat.location_id,
            shift_type: input.shift_type.unwrap_or(current.shift_type),
            assignment_type: current.assignment_type,
            start_date,
            end_date: None,
            status: AssignmentStatus::Active,
            created_by: caller,
            reviewed_by: Some(caller),
            rejection_reason: None,
            capacity_override,
            transferred_to: None,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        if !self.assignments.transfer(id, &replacement).await? {
            return Err(WorkforceServiceError::AssignmentNotActive);
        }
        info!(
            from_assignment = %id,
            to_assignment = %replacement.id,
            operator_id = %replacement.operator_id,
            from_beat = %current.beat_id,
            to_beat = %replacement.beat_id,
            "assignment transferred"
        );
        Ok(replacement)
    }
}

// ── Queries ──────────────────────────────────────────────────────────────────

pub struct GetAssignmentUseCase<A: AssignmentRepository> {
    pub assignments: A,
}

impl<A: AssignmentRepository> GetAssignmentUseCase<A> {
    pub async fn execute(&self, id: Uuid) -> Result<Assignment, WorkforceServiceError> {
        self.assignments
            .find(id)
            .await?
            .ok_or(WorkforceServiceError::AssignmentNotFound)
    }
}

pub struct ListAssignmentsUseCase<A: AssignmentRepository> {
    pub assignments: A,
}

impl<A: AssignmentRepository> ListAssignmentsUseCase<A> {
    pub async fn execute(
        &self,
        filter: AssignmentFilter,
        page: PageRequest,
    ) -> Result<Page<Assignment>, WorkforceServiceError> {
        self.assignments.list(filter, page).await
    }
}
