use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notification_cell::models::NotificationError;
use notification_cell::services::EmailNotificationService;
use shared_config::AppConfig;
use shared_utils::test_utils::TestConfig;

fn config_for(mock_server: &MockServer) -> AppConfig {
    let mut config = TestConfig::default().to_app_config();
    config.emailjs_api_url = format!("{}/api/v1.0/email/send", mock_server.uri());
    config
}

#[tokio::test]
async fn test_send_posts_message_with_configured_identities() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .and(body_partial_json(json!({
            "service_id": "service_test",
            "template_id": "template_test",
            "user_id": "test-public-key",
            "template_params": {
                "from_name": "CarePulse",
                "to_email": "operator@carepulse.example",
                "message": "Greetings from CarePulse."
            }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = EmailNotificationService::new(&config_for(&mock_server));
    let result = service.send("Greetings from CarePulse.").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_send_fails_on_delivery_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(422).set_body_string("template not found"))
        .mount(&mock_server)
        .await;

    let service = EmailNotificationService::new(&config_for(&mock_server));
    let result = service.send("hello").await;

    assert_matches!(result, Err(NotificationError::DeliveryFailed { .. }));
}

#[tokio::test]
async fn test_send_fails_when_unconfigured() {
    let mut config = TestConfig::default().to_app_config();
    config.emailjs_service_id = "".to_string();

    let service = EmailNotificationService::new(&config);
    let result = service.send("hello").await;

    assert_matches!(result, Err(NotificationError::NotConfigured));
}

#[tokio::test]
async fn test_notify_swallows_delivery_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = EmailNotificationService::new(&config_for(&mock_server));

    // Fire-and-forget: the failure is logged, never raised.
    service.notify("hello").await;
}
