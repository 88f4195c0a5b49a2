use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::text_enum;

text_enum! {
    /// PENDING → ACTIVE | REJECTED; ACTIVE → ENDED | TRANSFERRED.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum AssignmentStatus: "assignment status" {
        Pending => "PENDING",
        Active => "ACTIVE",
        Rejected => "REJECTED",
        Ended => "ENDED",
        Transferred => "TRANSFERRED",
    }
}

text_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum ShiftType: "shift type" {
        Day => "DAY",
        Night => "NIGHT",
        Rotating => "ROTATING",
    }
}

text_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum AssignmentType: "assignment type" {
        Permanent => "PERMANENT",
        Temporary => "TEMPORARY",
        Relief => "RELIEF",
    }
}

/// Posting of an operator to a beat under a supervisor.
#[derive(Debug, Clone)]
pub struct Assignment {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentFilter {
    pub status: Option<AssignmentStatus>,
    pub beat_id: Option<Uuid>,
    pub operator_id: Option<Uuid>,
    pub supervisor_id: Option<Uuid>,
}

impl AssignmentFilter {
    pub fn matches(&self, assignment: &Assignment) -> bool {
        self.status.is_none_or(|s| assignment.status == s)
            && self.beat_id.is_none_or(|id| assignment.beat_id == id)
            && self.operator_id.is_none_or(|id| assignment.operator_id == id)
            && self.supervisor_id.is_none_or(|id| assignment.supervisor_id == id)
    }
}
