use sea_orm::Database;
use tracing::info;

use guardpost_auth_types::token::JwtSecret;
use guardpost_core::config::Config;
use guardpost_core::tracing::{LogFormat, init_tracing};

use guardpost_workforce::config::WorkforceConfig;
use guardpost_workforce::infra::sms::TwilioSmsClient;
use guardpost_workforce::router::build_router;
use guardpost_workforce::state::AppState;

#[tokio::main]
async fn main() {
    let config = WorkforceConfig::from_env();
    init_tracing(LogFormat::parse(config.log_format.as_deref()));

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let sms = TwilioSmsClient::from_credentials(config.twilio())
        .expect("failed to build sms http client");
    if !sms.is_enabled() {
        info!("twilio credentials not set, sms disabled");
    }

    let state = AppState {
        db,
        sms,
        jwt_secret: JwtSecret::new(config.jwt_secret.as_str()),
        expiry_warning_days: config.expiry_warning_days,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.workforce_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("workforce service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
