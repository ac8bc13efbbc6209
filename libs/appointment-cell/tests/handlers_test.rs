use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::router::create_appointment_router;
use shared_utils::test_utils::{JwtTestUtils, MockAppwriteResponses, TestConfig, TestUser};

const APPOINTMENTS_PATH: &str = "/databases/test-database/collections/appointments/documents";

fn create_body(user_id: &str) -> Value {
    json!({
        "patient": "patient-doc-1",
        "primary_physician": "Leila Cameron",
        "schedule": "2026-01-05T09:30:00Z",
        "age": 34,
        "gender": "F",
        "neighbourhood": "CONQUISTA",
        "scholarship": "0",
        "hypertension": "0",
        "diabetes": "0",
        "alcoholism": "0",
        "handicap": "0",
        "sms_received": "1",
        "reason": "checkup",
        "note": null,
        "user_id": user_id,
        // Ignored by the API: the persisted status is always derived.
        "status": "scheduled"
    })
}

#[tokio::test]
async fn test_create_appointment_returns_success_redirect() {
    let mock_server = MockServer::start().await;
    let test_config = TestConfig::default();
    let mut config = test_config.to_app_config();
    config.appwrite_endpoint = mock_server.uri();

    let user = TestUser::patient("patient@example.com");
    let token = JwtTestUtils::create_test_token(&user, &test_config.jwt_secret, Some(24));

    let response_document =
        MockAppwriteResponses::appointment_document(&user.id, "patient-doc-1", "pending");
    let new_id = response_document["$id"].as_str().unwrap().to_string();

    Mock::given(method("POST"))
        .and(path(APPOINTMENTS_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(response_document))
        .mount(&mock_server)
        .await;

    let app = create_appointment_router(Arc::new(config));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("Authorization", format!("Bearer {}", token))
                .header("Content-Type", "application/json")
                .body(Body::from(create_body(&user.id).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["appointment"]["status"], "pending");
    let redirect = body["redirect_to"].as_str().unwrap();
    assert!(redirect.ends_with(&format!("success?appointmentId={}", new_id)));
    assert!(redirect.starts_with(&format!("/patients/{}/", user.id)));
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    let config = TestConfig::default().to_app_config();

    let app = create_appointment_router(Arc::new(config));
    let response = app
        .oneshot(Request::builder().method("GET").uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let test_config = TestConfig::default();
    let config = test_config.to_app_config();

    let user = TestUser::patient("patient@example.com");
    let token = JwtTestUtils::create_expired_token(&user, &test_config.jwt_secret);

    let app = create_appointment_router(Arc::new(config));
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_forged_token_is_rejected() {
    let config = TestConfig::default().to_app_config();

    let user = TestUser::patient("patient@example.com");
    let token = JwtTestUtils::create_invalid_signature_token(&user);

    let app = create_appointment_router(Arc::new(config));
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_appointments_returns_counts() {
    let mock_server = MockServer::start().await;
    let test_config = TestConfig::default();
    let mut config = test_config.to_app_config();
    config.appwrite_endpoint = mock_server.uri();

    let user = TestUser::staff("staff@example.com");
    let token = JwtTestUtils::create_test_token(&user, &test_config.jwt_secret, Some(24));

    let documents = vec![
        MockAppwriteResponses::appointment_document("u", "p", "scheduled"),
        MockAppwriteResponses::appointment_document("u", "p", "pending"),
    ];

    Mock::given(method("GET"))
        .and(path(APPOINTMENTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockAppwriteResponses::document_list(documents)),
        )
        .mount(&mock_server)
        .await;

    let app = create_appointment_router(Arc::new(config));
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["total"], 2);
    assert_eq!(body["scheduled_count"], 1);
    assert_eq!(body["pending_count"], 1);
    assert_eq!(body["cancelled_count"], 0);
}
