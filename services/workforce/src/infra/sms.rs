//! Twilio SMS delivery.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use tracing::{debug, info};

use crate::config::TwilioCredentials;
use crate::domain::repository::SmsSender;
use crate::error::WorkforceServiceError;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends SMS through the Twilio REST API. Without credentials every send is
/// a logged no-op.
#[derive(Clone)]
pub struct TwilioSmsClient {
    http: reqwest::Client,
    credentials: Option<Arc<TwilioCredentials>>,
}

impl TwilioSmsClient {
    pub fn new(http: reqwest::Client, credentials: Option<TwilioCredentials>) -> Self {
        Self {
            http,
            credentials: credentials.map(Arc::new),
        }
    }

    /// Client with a bounded request time, so a stalled provider cannot hold
    /// a request open.
    pub fn from_credentials(
        credentials: Option<TwilioCredentials>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::new(http, credentials))
    }

    pub fn disabled() -> Self {
        Self::new(reqwest::Client::new(), None)
    }

    pub fn is_enabled(&self) -> bool {
        self.credentials.is_some()
    }
}

impl SmsSender for TwilioSmsClient {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), WorkforceServiceError> {
        let Some(credentials) = &self.credentials else {
            debug!(to, "sms disabled, dropping message");
            return Ok(());
        };
        let url = format!(
            "{TWILIO_API_BASE}/Accounts/{}/Messages.json",
            credentials.account_sid
        );
        self.http
            .post(url)
            .basic_auth(&credentials.account_sid, Some(&credentials.auth_token))
            .form(&[
                ("To", to),
                ("From", credentials.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await
            .context("send sms request")?
            .error_for_status()
            .context("sms provider rejected message")?;
        info!(to, "sms sent");
        Ok(())
    }
}
