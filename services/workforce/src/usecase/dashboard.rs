use crate::domain::dashboard::DashboardSummary;
use crate::domain::repository::DashboardQuery;
use crate::error::WorkforceServiceError;

pub struct DashboardUseCase<D: DashboardQuery> {
    pub query: D,
}

impl<D: DashboardQuery> DashboardUseCase<D> {
    pub async fn execute(&self) -> Result<DashboardSummary, WorkforceServiceError> {
        self.query.summary().await
    }
}
