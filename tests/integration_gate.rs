mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::Duration;
use common::{TestApp, body_json};
use taskgate_auth::{Role, TokenCodec};

async fn get_tasks_with_header(app: &TestApp, value: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(Method::GET).uri("/api/tasks");
    if let Some(value) = value {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let response = app.send(builder.body(Body::empty()).unwrap()).await;
    let status = response.status();
    (status, body_json(response).await)
}

#[tokio::test]
async fn test_missing_authorization_header() {
    let app = TestApp::new();
    let (status, body) = get_tasks_with_header(&app, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");
}

#[tokio::test]
async fn test_prefix_must_be_exact() {
    let app = TestApp::new();
    let alice = app.seed_user("alice@example.com", Role::User).await;

    for value in [
        format!("bearer {}", alice.token),
        format!("BEARER {}", alice.token),
        format!("Basic {}", alice.token),
        format!("Bearer  {}", alice.token),
        alice.token.clone(),
    ] {
        let (status, _) = get_tasks_with_header(&app, Some(&value)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {:?}", value);
    }

    let (status, _) = get_tasks_with_header(&app, Some(&format!("Bearer {}", alice.token))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_and_invalid_tokens_look_the_same() {
    let app = TestApp::new();
    let alice = app.seed_user("alice@example.com", Role::User).await;

    let expired = app
        .state
        .codec
        .issue(
            &alice.user.id.to_string(),
            &alice.user.email,
            Role::User,
            Duration::hours(-1),
        )
        .unwrap();
    let foreign = TokenCodec::new("another-secret-key-at-least-32-characters")
        .issue(
            &alice.user.id.to_string(),
            &alice.user.email,
            Role::User,
            Duration::hours(1),
        )
        .unwrap();

    let (expired_status, expired_body) =
        get_tasks_with_header(&app, Some(&format!("Bearer {}", expired))).await;
    let (foreign_status, foreign_body) =
        get_tasks_with_header(&app, Some(&format!("Bearer {}", foreign))).await;
    let (garbage_status, garbage_body) =
        get_tasks_with_header(&app, Some("Bearer not.a.token")).await;

    for status in [expired_status, foreign_status, garbage_status] {
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
    assert_eq!(expired_body, foreign_body);
    assert_eq!(foreign_body, garbage_body);
    assert_eq!(expired_body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_empty_bearer_token() {
    let app = TestApp::new();
    let (status, body) = get_tasks_with_header(&app, Some("Bearer ")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_forged_admin_role_rejected() {
    let app = TestApp::new();
    let alice = app.seed_user("alice@example.com", Role::User).await;
    let admin = app.seed_user("admin@example.com", Role::Admin).await;

    // Alice's header and signature around a payload claiming admin.
    let user_parts: Vec<&str> = alice.token.split('.').collect();
    let admin_parts: Vec<&str> = admin.token.split('.').collect();
    let forged = format!("{}.{}.{}", user_parts[0], admin_parts[1], user_parts[2]);

    let (status, _) = app
        .json(Method::GET, "/api/users", Some(&forged), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unsigned_token_rejected() {
    let app = TestApp::new();
    let unsigned = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJzdWIiOiIwMDAwMDAwMC0wMDAwLTAwMDAtMDAwMC0wMDAwMDAwMDAwMDEiLCJlbWFpbCI6ImFAeC5jb20iLCJyb2xlIjoiYWRtaW4iLCJpYXQiOjE3MDAwMDAwMDAsImV4cCI6NDEwMjQ0NDgwMH0.";

    let (status, _) = app
        .json(Method::GET, "/api/users", Some(unsigned), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let app = TestApp::new();

    let (status, _) = app.json(Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .json(Method::GET, "/api-docs/openapi.json", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
}
