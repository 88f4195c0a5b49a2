use serde::Deserialize;

use guardpost_core::config::Config;

/// Workforce service configuration loaded from environment variables.
#[derive(Deserialize)]
pub struct WorkforceConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for verifying bearer tokens.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 3120). Env var: `WORKFORCE_PORT`.
    #[serde(default = "default_port")]
    pub workforce_port: u16,
    /// Documents expiring within this many days are EXPIRING_SOON.
    #[serde(default = "default_expiry_warning_days")]
    pub expiry_warning_days: u32,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_from_number: Option<String>,
    /// `json` (default) or `pretty`.
    pub log_format: Option<String>,
}

fn default_port() -> u16 {
    3120
}

fn default_expiry_warning_days() -> u32 {
    30
}

impl Config for WorkforceConfig {}

/// Credentials for the Twilio messaging API.
#[derive(Clone)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

impl WorkforceConfig {
    /// SMS is enabled only when all three Twilio values are present.
    pub fn twilio(&self) -> Option<TwilioCredentials> {
        Some(TwilioCredentials {
            account_sid: self.twilio_account_sid.clone()?,
            auth_token: self.twilio_auth_token.clone()?,
            from_number: self.twilio_from_number.clone()?,
        })
    }
}
