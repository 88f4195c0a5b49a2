use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use guardpost_auth_types::token::JwtSecret;
use guardpost_domain::role::Role;
use guardpost_testing::auth::{MockAuth, TEST_JWT_SECRET};
use guardpost_workforce::infra::sms::TwilioSmsClient;
use guardpost_workforce::router::build_router;
use guardpost_workforce::state::AppState;

/// Router over a disconnected database: only requests rejected before any
/// query runs can be asserted here.
fn router() -> axum::Router {
    build_router(AppState {
        db: DatabaseConnection::Disconnected,
        sms: TwilioSmsClient::disabled(),
        jwt_secret: JwtSecret::new(TEST_JWT_SECRET),
        expiry_warning_days: 30,
    })
}

async fn call(method: Method, uri: &str, auth: Option<&MockAuth>) -> StatusCode {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        let (name, value) = auth.header();
        builder = builder.header(name, value);
    }
    let request = builder.body(Body::empty()).unwrap();
    router().oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn should_answer_liveness_probe() {
    assert_eq!(call(Method::GET, "/healthz", None).await, StatusCode::OK);
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    assert_eq!(
        call(Method::GET, "/readyz", None).await,
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn should_reject_missing_bearer_token() {
    for uri in ["/dashboard", "/staff", "/ledger", "/messages/inbox", "/users/@me"] {
        assert_eq!(
            call(Method::GET, uri, None).await,
            StatusCode::UNAUTHORIZED,
            "{uri} should require a token"
        );
    }
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let mut auth = MockAuth::as_role(Role::Director);
    auth.secret = "some-other-secret".to_owned();

    assert_eq!(
        call(Method::GET, "/dashboard", Some(&auth)).await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn should_forbid_operator_from_office_endpoints() {
    let operator = MockAuth::as_role(Role::Operator);
    for uri in ["/dashboard", "/ledger", "/ledger/report", "/staff"] {
        assert_eq!(
            call(Method::GET, uri, Some(&operator)).await,
            StatusCode::FORBIDDEN,
            "operator should not reach {uri}"
        );
    }
}

#[tokio::test]
async fn should_forbid_supervisor_from_ledger() {
    let supervisor = MockAuth::as_role(Role::Supervisor);
    assert_eq!(
        call(Method::GET, "/ledger", Some(&supervisor)).await,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn should_return_not_found_for_unknown_route() {
    assert_eq!(
        call(Method::GET, "/no-such-route", None).await,
        StatusCode::NOT_FOUND
    );
}
