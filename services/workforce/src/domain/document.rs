use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A staff document. The file itself lives in external storage.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub document_type: String,
    pub file_url: String,
    pub expires_on: Option<NaiveDate>,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryStatus {
    Valid,
    ExpiringSoon,
    Expired,
}

impl ExpiryStatus {
    /// Negative `days_left` is EXPIRED, up to `warning_days` is EXPIRING_SOON.
    pub fn classify(expires_on: Option<NaiveDate>, today: NaiveDate, warning_days: u32) -> Self {
        let Some(expires_on) = expires_on else {
            return Self::Valid;
        };
        let days_left = (expires_on - today).num_days();
        if days_left < 0 {
            Self::Expired
        } else if days_left <= i64::from(warning_days) {
            Self::ExpiringSoon
        } else {
            Self::Valid
        }
    }
}

impl Document {
    pub fn days_left(&self, today: NaiveDate) -> Option<i64> {
        self.expires_on.map(|d| (d - today).num_days())
    }

    pub fn expiry_status(&self, today: NaiveDate, warning_days: u32) -> ExpiryStatus {
        ExpiryStatus::classify(self.expires_on, today, warning_days)
    }
}
