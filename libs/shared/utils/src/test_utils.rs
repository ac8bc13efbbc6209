use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;

pub struct TestConfig {
    pub jwt_secret: String,
    pub appwrite_endpoint: String,
    pub zoom_oauth_url: String,
    pub zoom_api_base_url: String,
    pub emailjs_api_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            appwrite_endpoint: "http://localhost:48080/v1".to_string(),
            zoom_oauth_url: "http://localhost:48081/oauth/token".to_string(),
            zoom_api_base_url: "http://localhost:48081/v2".to_string(),
            emailjs_api_url: "http://localhost:48082/api/v1.0/email/send".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            appwrite_endpoint: self.appwrite_endpoint.clone(),
            appwrite_project_id: "test-project".to_string(),
            appwrite_api_key: "test-api-key".to_string(),
            appwrite_database_id: "test-database".to_string(),
            appwrite_patient_collection_id: "patients".to_string(),
            appwrite_appointment_collection_id: "appointments".to_string(),
            appwrite_storage_bucket_id: "identification".to_string(),
            auth_jwt_secret: self.jwt_secret.clone(),
            zoom_client_id: "test-zoom-client".to_string(),
            zoom_client_secret: "test-zoom-secret".to_string(),
            zoom_account_id: "test-zoom-account".to_string(),
            zoom_oauth_url: self.zoom_oauth_url.clone(),
            zoom_api_base_url: self.zoom_api_base_url.clone(),
            emailjs_api_url: self.emailjs_api_url.clone(),
            emailjs_service_id: "service_test".to_string(),
            emailjs_template_id: "template_test".to_string(),
            emailjs_public_key: "test-public-key".to_string(),
            notification_sender_name: "CarePulse".to_string(),
            notification_sender_email: "noreply@carepulse.example".to_string(),
            notification_recipient_name: "CarePulse Operator".to_string(),
            notification_recipient_email: "operator@carepulse.example".to_string(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "patient".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, "patient")
    }

    pub fn staff(email: &str) -> Self {
        Self::new(email, "staff")
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            metadata: None,
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

pub struct MockAppwriteResponses;

impl MockAppwriteResponses {
    pub fn patient_document(user_id: &str) -> serde_json::Value {
        json!({
            "$id": Uuid::new_v4().to_string(),
            "$createdAt": "2026-01-01T00:00:00.000+00:00",
            "$updatedAt": "2026-01-01T00:00:00.000+00:00",
            "user_id": user_id,
            "name": "Test Patient",
            "email": "test@example.com",
            "phone": "+353851234567",
            "age": 34,
            "gender": "F",
            "neighbourhood": "CONQUISTA",
            "scholarship": "0",
            "hypertension": "0",
            "diabetes": "0",
            "alcoholism": "0",
            "handicap": "0",
            "sms_received": "1",
            "primary_physician": "Leila Cameron",
            "identification_type": "Passport",
            "identification_number": "P1234567",
            "identification_document_id": null,
            "identification_document_url": null,
            "privacy_consent": true,
            "treatment_consent": true,
            "disclosure_consent": false
        })
    }

    pub fn appointment_document(user_id: &str, patient_id: &str, status: &str) -> serde_json::Value {
        json!({
            "$id": Uuid::new_v4().to_string(),
            "$createdAt": "2026-01-02T00:00:00.000+00:00",
            "$updatedAt": "2026-01-02T00:00:00.000+00:00",
            "user_id": user_id,
            "patient": patient_id,
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
            "reason": "Annual check-up",
            "note": null,
            "cancellation_reason": null,
            "status": status
        })
    }

    pub fn document_list(documents: Vec<serde_json::Value>) -> serde_json::Value {
        json!({
            "total": documents.len(),
            "documents": documents
        })
    }

    pub fn zoom_token_response(access_token: &str) -> serde_json::Value {
        json!({
            "access_token": access_token,
            "token_type": "bearer",
            "expires_in": 3599,
            "scope": "meeting:write:admin"
        })
    }

    pub fn zoom_meeting_response(join_url: &str) -> serde_json::Value {
        json!({
            "id": 98765432100u64,
            "topic": "CarePulse Appointment",
            "type": 1,
            "join_url": join_url,
            "settings": {
                "host_video": true,
                "participant_video": true
            }
        })
    }

    pub fn error_response(message: &str, code: u16) -> serde_json::Value {
        json!({
            "message": message,
            "code": code,
            "type": "general_error"
        })
    }
}
