use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered patient as stored in the document database.
///
/// Created once at registration and referenced by id from appointments;
/// this core never mutates a patient record afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: i64,
    pub gender: String,
    pub neighbourhood: String,
    pub scholarship: String,
    pub hypertension: String,
    pub diabetes: String,
    pub alcoholism: String,
    pub handicap: String,
    pub sms_received: String,
    pub primary_physician: String,
    pub identification_type: Option<String>,
    pub identification_number: Option<String>,
    pub identification_document_id: Option<String>,
    pub identification_document_url: Option<String>,
    pub privacy_consent: bool,
    pub treatment_consent: bool,
    pub disclosure_consent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: i64,
    pub gender: String,
    pub neighbourhood: String,
    pub scholarship: String,
    pub hypertension: String,
    pub diabetes: String,
    pub alcoholism: String,
    pub handicap: String,
    pub sms_received: String,
    pub primary_physician: String,
    pub identification_type: Option<String>,
    pub identification_number: Option<String>,
    pub identification_document: Option<IdentificationDocumentUpload>,
    pub privacy_consent: bool,
    pub treatment_consent: bool,
    pub disclosure_consent: bool,
}

/// Identification document carried inline on the registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentificationDocumentUpload {
    pub file_name: String,
    pub content_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("Invalid identification document: {0}")]
    InvalidDocument(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
