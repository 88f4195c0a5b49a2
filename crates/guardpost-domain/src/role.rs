//! Staff roles and the role → capability table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Staff role.
///
/// Wire format: SCREAMING_SNAKE string (`"OPERATOR"`, `"GENERAL_SUPERVISOR"`, ...),
/// both in JSON bodies and in the `role` claim of access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Operator,
    Supervisor,
    GeneralSupervisor,
    Manager,
    Secretary,
    Director,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Operator,
        Role::Supervisor,
        Role::GeneralSupervisor,
        Role::Manager,
        Role::Secretary,
        Role::Director,
        Role::Admin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Operator => "OPERATOR",
            Self::Supervisor => "SUPERVISOR",
            Self::GeneralSupervisor => "GENERAL_SUPERVISOR",
            Self::Manager => "MANAGER",
            Self::Secretary => "SECRETARY",
            Self::Director => "DIRECTOR",
            Self::Admin => "ADMIN",
        }
    }

    /// Field roles go through the registration → approval workflow.
    /// Every other role is created directly by an administrator.
    pub fn requires_approval(self) -> bool {
        matches!(self, Self::Operator | Self::Supervisor)
    }

    /// Roles that may be named as the supervisor of an assignment.
    pub fn is_supervisory(self) -> bool {
        matches!(self, Self::Supervisor | Self::GeneralSupervisor)
    }

    /// Prefix of the sequential employee id issued to this role.
    pub fn employee_id_prefix(self) -> &'static str {
        match self {
            Self::Operator => "OPR",
            Self::Supervisor | Self::GeneralSupervisor => "SUP",
            _ => "STF",
        }
    }

    /// Look up whether this role holds `capability`.
    pub fn can(self, capability: Capability) -> bool {
        GRANTS
            .iter()
            .find(|(cap, _)| *cap == capability)
            .is_some_and(|(_, roles)| roles.contains(&self))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

/// A named permission checked by handlers before running a use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Register operators/supervisors on someone else's behalf.
    RegisterPersonnel,
    /// Approve or reject pending operators/supervisors.
    ReviewPersonnel,
    /// Create office accounts and change user status.
    ManageUsers,
    /// Create and edit locations and BEATs.
    ManageSites,
    /// View staff lists, assignments and the dashboard.
    ViewRoster,
    /// Propose an assignment.
    CreateAssignment,
    /// Assignments created by this role start ACTIVE.
    AutoApproveAssignment,
    /// Approve or reject a pending assignment.
    ReviewAssignment,
    /// End or transfer an active assignment.
    ManageAssignments,
    Broadcast,
    RecordLedger,
    ViewLedger,
    ClassifyLedger,
    ManageDocuments,
    ScheduleMeetings,
}

use Role::*;

const OFFICE: &[Role] = &[Manager, Secretary, Director, Admin];

const GRANTS: &[(Capability, &[Role])] = &[
    (Capability::RegisterPersonnel, OFFICE),
    (Capability::ReviewPersonnel, &[Manager, Director]),
    (Capability::ManageUsers, &[Director, Admin]),
    (Capability::ManageSites, &[Manager, Director, Admin]),
    (
        Capability::ViewRoster,
        &[Supervisor, GeneralSupervisor, Manager, Secretary, Director, Admin],
    ),
    (
        Capability::CreateAssignment,
        &[Supervisor, GeneralSupervisor, Manager, Secretary, Director],
    ),
    (Capability::AutoApproveAssignment, &[Manager]),
    (Capability::ReviewAssignment, &[Manager]),
    (Capability::ManageAssignments, &[Manager, Director]),
    (Capability::Broadcast, &[Manager, Director, Admin]),
    (Capability::RecordLedger, &[Manager, Secretary, Director]),
    (Capability::ViewLedger, OFFICE),
    (Capability::ClassifyLedger, &[Director, Admin]),
    (Capability::ManageDocuments, OFFICE),
    (
        Capability::ScheduleMeetings,
        &[GeneralSupervisor, Manager, Secretary, Director, Admin],
    ),
];
