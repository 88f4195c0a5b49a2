use anyhow::Context as _;
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement};

use crate::domain::dashboard::DashboardSummary;
use crate::domain::repository::DashboardQuery;
use crate::error::WorkforceServiceError;

#[derive(Debug, Default, FromQueryResult)]
struct SummaryRow {
    pending_approvals: i64,
    approved_operators: i64,
    active_assignments: i64,
    pending_assignments: i64,
    active_beats: i64,
    full_beats: i64,
    understaffed_beats: i64,
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

#[derive(Clone)]
pub struct DbDashboardQuery {
    pub db: DatabaseConnection,
}

impl DashboardQuery for DbDashboardQuery {
    async fn summary(&self) -> Result<DashboardSummary, WorkforceServiceError> {
        let row = SummaryRow::find_by_statement(Statement::from_string(
            self.db.get_database_backend(),
            r#"
            WITH occupancy AS (
                SELECT b.id, b.number_of_operators,
                       COUNT(a.id) FILTER (WHERE a.status = 'ACTIVE') AS occupied
                FROM beats b
                JOIN locations l ON l.id = b.location_id AND l.is_active
                LEFT JOIN assignments a ON a.beat_id = b.id
                WHERE b.is_active
                GROUP BY b.id, b.number_of_operators
            )
            SELECT
                (SELECT COUNT(*) FROM staff_profiles
                  WHERE approval_status = 'PENDING') AS pending_approvals,
                (SELECT COUNT(*) FROM staff_profiles p JOIN users u ON u.id = p.user_id
                  WHERE p.approval_status = 'APPROVED' AND u.role = 'OPERATOR') AS approved_operators,
                (SELECT COUNT(*) FROM assignments WHERE status = 'ACTIVE') AS active_assignments,
                (SELECT COUNT(*) FROM assignments WHERE status = 'PENDING') AS pending_assignments,
                (SELECT COUNT(*) FROM occupancy) AS active_beats,
                (SELECT COUNT(*) FROM occupancy
                  WHERE occupied >= number_of_operators) AS full_beats,
                (SELECT COUNT(*) FROM occupancy
                  WHERE occupied < number_of_operators) AS understaffed_beats
            "#,
        ))
        .one(&self.db)
        .await
        .context("compute dashboard summary")?
        .unwrap_or_default();

        Ok(DashboardSummary {
            pending_approvals: count(row.pending_approvals),
            approved_operators: count(row.approved_operators),
            active_assignments: count(row.active_assignments),
            pending_assignments: count(row.pending_assignments),
            active_beats: count(row.active_beats),
            full_beats: count(row.full_beats),
            understaffed_beats: count(row.understaffed_beats),
        })
    }
}
