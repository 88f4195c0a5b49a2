use axum::{Json, extract::State};

use guardpost_auth_types::identity::Identity;
use guardpost_domain::role::Capability;

use crate::domain::dashboard::DashboardSummary;
use crate::error::WorkforceServiceError;
use crate::state::AppState;
use crate::usecase::dashboard::DashboardUseCase;

// ── GET /dashboard ───────────────────────────────────────────────────────────

pub async fn get_dashboard(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, WorkforceServiceError> {
    identity.require(Capability::ViewRoster)?;
    let uc = DashboardUseCase {
        query: state.dashboard_query(),
    };
    Ok(Json(uc.execute().await?))
}
