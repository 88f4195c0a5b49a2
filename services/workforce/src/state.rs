use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use guardpost_auth_types::token::JwtSecret;

use crate::infra::db::{
    DbAssignmentRepository, DbBeatRepository, DbBroadcastRepository, DbDashboardQuery,
    DbDocumentRepository, DbLedgerRepository, DbLocationRepository, DbMeetingRepository,
    DbMessageRepository, DbStaffRepository,
};
use crate::infra::sms::TwilioSmsClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub sms: TwilioSmsClient,
    pub jwt_secret: JwtSecret,
    pub expiry_warning_days: u32,
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}

impl AppState {
    pub fn staff_repo(&self) -> DbStaffRepository {
        DbStaffRepository {
            db: self.db.clone(),
        }
    }

    pub fn location_repo(&self) -> DbLocationRepository {
        DbLocationRepository {
            db: self.db.clone(),
        }
    }

    pub fn beat_repo(&self) -> DbBeatRepository {
        DbBeatRepository {
            db: self.db.clone(),
        }
    }

    pub fn assignment_repo(&self) -> DbAssignmentRepository {
        DbAssignmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn ledger_repo(&self) -> DbLedgerRepository {
        DbLedgerRepository {
            db: self.db.clone(),
        }
    }

    pub fn message_repo(&self) -> DbMessageRepository {
        DbMessageRepository {
            db: self.db.clone(),
        }
    }

    pub fn broadcast_repo(&self) -> DbBroadcastRepository {
        DbBroadcastRepository {
            db: self.db.clone(),
        }
    }

    pub fn document_repo(&self) -> DbDocumentRepository {
        DbDocumentRepository {
            db: self.db.clone(),
        }
    }

    pub fn meeting_repo(&self) -> DbMeetingRepository {
        DbMeetingRepository {
            db: self.db.clone(),
        }
    }

    pub fn dashboard_query(&self) -> DbDashboardQuery {
        DbDashboardQuery {
            db: self.db.clone(),
        }
    }
}
