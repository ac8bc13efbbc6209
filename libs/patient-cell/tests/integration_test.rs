use assert_matches::assert_matches;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use patient_cell::models::{IdentificationDocumentUpload, PatientError, RegisterPatientRequest};
use patient_cell::services::PatientService;
use shared_config::AppConfig;
use shared_utils::test_utils::{MockAppwriteResponses, TestConfig, TestUser};

const PATIENTS_PATH: &str = "/databases/test-database/collections/patients/documents";
const FILES_PATH: &str = "/storage/buckets/identification/files";

fn config_for(mock_server: &MockServer) -> AppConfig {
    let mut config = TestConfig::default().to_app_config();
    config.appwrite_endpoint = mock_server.uri();
    config
}

fn register_request() -> RegisterPatientRequest {
    RegisterPatientRequest {
        name: "Test Patient".to_string(),
        email: "test@example.com".to_string(),
        phone: "+353851234567".to_string(),
        age: 34,
        gender: "F".to_string(),
        neighbourhood: "CONQUISTA".to_string(),
        scholarship: "0".to_string(),
        hypertension: "0".to_string(),
        diabetes: "0".to_string(),
        alcoholism: "0".to_string(),
        handicap: "0".to_string(),
        sms_received: "1".to_string(),
        primary_physician: "Leila Cameron".to_string(),
        identification_type: Some("Passport".to_string()),
        identification_number: Some("P1234567".to_string()),
        identification_document: None,
        privacy_consent: true,
        treatment_consent: true,
        disclosure_consent: false,
    }
}

#[tokio::test]
async fn test_register_patient_creates_document() {
    let mock_server = MockServer::start().await;
    let user = TestUser::patient("test@example.com");

    Mock::given(method("POST"))
        .and(path(PATIENTS_PATH))
        .and(body_partial_json(json!({
            "data": {
                "user_id": user.id,
                "name": "Test Patient",
                "privacy_consent": true
            }
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(MockAppwriteResponses::patient_document(&user.id)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = PatientService::new(&config_for(&mock_server));
    let patient = service
        .register_patient(&user.to_user(), register_request())
        .await
        .unwrap();

    assert_eq!(patient.user_id, user.id);
    assert_eq!(patient.primary_physician, "Leila Cameron");
}

#[tokio::test]
async fn test_register_patient_uploads_identification_document() {
    let mock_server = MockServer::start().await;
    let user = TestUser::patient("test@example.com");
    let file_id = "ident-file-1";

    Mock::given(method("POST"))
        .and(path(FILES_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "$id": file_id,
            "name": "passport.png"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(PATIENTS_PATH))
        .and(body_partial_json(json!({
            "data": { "identification_document_id": file_id }
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(MockAppwriteResponses::patient_document(&user.id)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut request = register_request();
    request.identification_document = Some(IdentificationDocumentUpload {
        file_name: "passport.png".to_string(),
        content_base64: STANDARD.encode(b"fake image bytes"),
    });

    let service = PatientService::new(&config_for(&mock_server));
    let result = service.register_patient(&user.to_user(), request).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_register_patient_rejects_malformed_document() {
    let mock_server = MockServer::start().await;
    let user = TestUser::patient("test@example.com");

    let mut request = register_request();
    request.identification_document = Some(IdentificationDocumentUpload {
        file_name: "passport.png".to_string(),
        content_base64: "not-valid-base64!!!".to_string(),
    });

    let service = PatientService::new(&config_for(&mock_server));
    let result = service.register_patient(&user.to_user(), request).await;

    assert_matches!(result, Err(PatientError::InvalidDocument(_)));
}

#[tokio::test]
async fn test_register_patient_validates_answer_codes() {
    let mock_server = MockServer::start().await;
    let user = TestUser::patient("test@example.com");

    let mut request = register_request();
    request.hypertension = "yes".to_string();

    let service = PatientService::new(&config_for(&mock_server));
    let result = service.register_patient(&user.to_user(), request).await;

    assert_matches!(result, Err(PatientError::ValidationError(_)));
}

#[tokio::test]
async fn test_register_patient_validates_physician_roster() {
    let mock_server = MockServer::start().await;
    let user = TestUser::patient("test@example.com");

    let mut request = register_request();
    request.primary_physician = "Gregory House".to_string();

    let service = PatientService::new(&config_for(&mock_server));
    let result = service.register_patient(&user.to_user(), request).await;

    assert_matches!(result, Err(PatientError::ValidationError(_)));
}

#[tokio::test]
async fn test_get_missing_patient_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/missing-id", PATIENTS_PATH)))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(MockAppwriteResponses::error_response("not found", 404)),
        )
        .mount(&mock_server)
        .await;

    let service = PatientService::new(&config_for(&mock_server));
    let result = service.get_patient("missing-id").await;

    assert_matches!(result, Err(PatientError::NotFound));
}
