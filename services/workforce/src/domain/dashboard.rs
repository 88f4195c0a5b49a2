use serde::Serialize;

/// Headline counts, computed on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub pending_approvals: u64,
    pub approved_operators: u64,
    pub active_assignments: u64,
    pub pending_assignments: u64,
    pub active_beats: u64,
    /// Active beats whose occupancy has reached their headcount.
    pub full_beats: u64,
    /// Active beats with at least one open slot.
    pub understaffed_beats: u64,
}
