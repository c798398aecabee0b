//! Parameter validation tests for the upload action
//!
//! Drives the router directly with tower's oneshot so every contractual
//! error message is pinned down without a running server.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use vellum_core::SitePolicy;
use vellum_http::FetchManager;
use vellum_interfaces::{RepositoryFactory, UserRepository};
use vellum_rest_api::{create_rest_app, AppConfig, UploadsContext};
use vellum_storage::{InMemoryJobQueue, InMemoryRepositoryFactory};

struct TestApp {
    router: axum::Router,
    sysop_token: String,
    user_token: String,
}

async fn setup() -> TestApp {
    let repositories: Arc<dyn RepositoryFactory> = Arc::new(InMemoryRepositoryFactory::new());
    let sysop = repositories
        .user_repository()
        .create_user("Admin", &["user".to_string(), "sysop".to_string()])
        .await
        .unwrap();
    let plain = repositories
        .user_repository()
        .create_user("Visitor", &["user".to_string()])
        .await
        .unwrap();

    let mut fetcher = FetchManager::new();
    fetcher.set_offline();
    fetcher.add_mock("http://media.example.org/Wiki.png", b"png-bytes".to_vec(), Some("image/png"));

    let context = UploadsContext::new(
        repositories,
        Arc::new(InMemoryJobQueue::new()),
        Arc::new(fetcher),
        Arc::new(SitePolicy::default()),
        vec!["http".to_string(), "https".to_string()],
    );

    TestApp {
        router: create_rest_app(context, AppConfig::default()),
        sysop_token: sysop.edit_token,
        user_token: plain.edit_token,
    }
}

async fn post_upload(router: &axum::Router, user: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/upload")
        .header("content-type", "application/json")
        .header("x-api-user", user)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn missing_token_is_rejected_first() {
    let app = setup().await;
    let (status, body) = post_upload(&app.router, "Admin", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "The token parameter must be set");
}

#[tokio::test]
async fn wrong_token_is_rejected() {
    let app = setup().await;
    let (status, body) = post_upload(&app.router, "Admin", json!({"token": "bogus"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Invalid token");
}

#[tokio::test]
async fn some_source_parameter_is_required() {
    let app = setup().await;
    let (status, body) = post_upload(&app.router, "Admin", json!({"token": &app.sysop_token})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body),
        "One of the parameters sessionkey, file, url, statuskey is required"
    );
}

#[tokio::test]
async fn filename_is_required_for_url_uploads() {
    let app = setup().await;
    let (status, body) = post_upload(
        &app.router,
        "Admin",
        json!({"token": &app.sysop_token, "url": "http://media.example.org/Wiki.png"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "The filename parameter must be set");
}

#[tokio::test]
async fn url_uploads_need_the_upload_by_url_right() {
    let app = setup().await;
    let (status, body) = post_upload(
        &app.router,
        "Visitor",
        json!({
            "token": &app.user_token,
            "url": "http://media.example.org/Wiki.png",
            "filename": "Wiki.png"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_message(&body), "Permission denied");
}

#[tokio::test]
async fn disallowed_url_scheme_is_rejected() {
    let app = setup().await;
    let (status, body) = post_upload(
        &app.router,
        "Admin",
        json!({
            "token": &app.sysop_token,
            "url": "ftp://media.example.org/Wiki.png",
            "filename": "Wiki.png"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid or disallowed URL scheme");
}

#[tokio::test]
async fn leavemessage_requires_ignorewarnings_for_async_uploads() {
    let app = setup().await;
    let (status, body) = post_upload(
        &app.router,
        "Admin",
        json!({
            "token": &app.sysop_token,
            "url": "http://media.example.org/Wiki.png",
            "filename": "Wiki.png",
            "asyncdownload": true,
            "leavemessage": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body),
        "Using leavemessage without ignorewarnings is not supported"
    );
}

#[tokio::test]
async fn unknown_status_key_has_no_result() {
    let app = setup().await;
    let (status, body) = post_upload(
        &app.router,
        "Admin",
        json!({"token": &app.sysop_token, "statuskey": "nonexistent"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "No result in status data");
}

#[tokio::test]
async fn unknown_session_key_is_invalid() {
    let app = setup().await;
    let (status, body) = post_upload(
        &app.router,
        "Admin",
        json!({
            "token": &app.sysop_token,
            "sessionkey": "nonexistent.png",
            "filename": "Wiki.png",
            "ignorewarnings": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Not a valid session key");
}

#[tokio::test]
async fn edit_token_endpoint_returns_the_user_token() {
    let app = setup().await;
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/auth/token")
        .header("x-api-user", "Admin")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["token"].as_str().unwrap(), app.sysop_token);
}

#[tokio::test]
async fn sync_copy_upload_succeeds_inline() {
    let app = setup().await;
    let (status, body) = post_upload(
        &app.router,
        "Admin",
        json!({
            "token": &app.sysop_token,
            "url": "http://media.example.org/Wiki.png",
            "filename": "Wiki.png",
            "ignorewarnings": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["upload"]["result"], "Success");
    assert_eq!(body["upload"]["filename"], "Wiki.png");
}
