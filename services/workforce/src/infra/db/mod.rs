//! sea-orm implementations of the repository ports.

use anyhow::Context as _;
use sea_orm::{DbErr, SqlErr, TransactionError};

use guardpost_domain::role::Role;

pub mod assignment;
pub mod dashboard;
pub mod document;
pub mod ledger;
pub mod meeting;
pub mod messaging;
pub mod personnel;
pub mod site;

pub use assignment::DbAssignmentRepository;
pub use dashboard::DbDashboardQuery;
pub use document::DbDocumentRepository;
pub use ledger::DbLedgerRepository;
pub use meeting::DbMeetingRepository;
pub use messaging::{DbBroadcastRepository, DbMessageRepository};
pub use personnel::DbStaffRepository;
pub use site::{DbBeatRepository, DbLocationRepository};

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn is_unique_violation_in_txn(err: &TransactionError<DbErr>) -> bool {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => {
            is_unique_violation(e)
        }
    }
}

fn roles_to_json(roles: &[Role]) -> serde_json::Value {
    roles.iter().map(|r| r.as_str()).collect::<Vec<_>>().into()
}

fn roles_from_json(value: serde_json::Value) -> anyhow::Result<Vec<Role>> {
    serde_json::from_value(value).context("decode role list")
}

/// `["ROLE"]`, for `@>` containment against a jsonb role list.
fn role_containment(role: Role) -> String {
    format!("[\"{}\"]", role.as_str())
}
