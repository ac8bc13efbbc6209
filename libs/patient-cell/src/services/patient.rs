use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{json, Value};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::AppwriteClient;
use shared_models::auth::User;
use shared_models::reference;

use crate::models::{IdentificationDocumentUpload, Patient, PatientError, RegisterPatientRequest};

pub struct PatientService {
    appwrite: AppwriteClient,
    collection_id: String,
}

impl PatientService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            appwrite: AppwriteClient::new(config),
            collection_id: config.appwrite_patient_collection_id.clone(),
        }
    }

    /// Register a new patient: upload the identification document when one
    /// was provided, then create the patient record.
    pub async fn register_patient(
        &self,
        user: &User,
        request: RegisterPatientRequest,
    ) -> Result<Patient, PatientError> {
        debug!("Registering patient profile for user {}", user.id);

        self.validate_registration(&request)?;

        let (document_id, document_url) = match &request.identification_document {
            Some(upload) => {
                let file_id = self.upload_identification_document(upload).await?;
                let view_url = self.appwrite.file_view_url(&file_id);
                (Some(file_id), Some(view_url))
            }
            None => (None, None),
        };

        let patient_data = json!({
            "user_id": user.id,
            "name": request.name,
            "email": request.email,
            "phone": request.phone,
            "age": request.age,
            "gender": request.gender,
            "neighbourhood": request.neighbourhood,
            "scholarship": request.scholarship,
            "hypertension": request.hypertension,
            "diabetes": request.diabetes,
            "alcoholism": request.alcoholism,
            "handicap": request.handicap,
            "sms_received": request.sms_received,
            "primary_physician": request.primary_physician,
            "identification_type": request.identification_type,
            "identification_number": request.identification_number,
            "identification_document_id": document_id,
            "identification_document_url": document_url,
            "privacy_consent": request.privacy_consent,
            "treatment_consent": request.treatment_consent,
            "disclosure_consent": request.disclosure_consent,
        });

        let created = self
            .appwrite
            .create_document(&self.collection_id, patient_data)
            .await
            .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        let patient: Patient = serde_json::from_value(created)
            .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        info!("Patient profile created with id {}", patient.id);
        Ok(patient)
    }

    pub async fn get_patient(&self, patient_id: &str) -> Result<Patient, PatientError> {
        debug!("Fetching patient profile {}", patient_id);

        let document = self
            .appwrite
            .get_document(&self.collection_id, patient_id)
            .await
            .map_err(|_| PatientError::NotFound)?;

        let patient: Patient = serde_json::from_value(document)
            .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        Ok(patient)
    }

    async fn upload_identification_document(
        &self,
        upload: &IdentificationDocumentUpload,
    ) -> Result<String, PatientError> {
        let bytes = STANDARD
            .decode(&upload.content_base64)
            .map_err(|e| PatientError::InvalidDocument(e.to_string()))?;

        let file = self
            .appwrite
            .create_file(&upload.file_name, bytes)
            .await
            .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        file.get("$id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                PatientError::DatabaseError("File response missing $id".to_string())
            })
    }

    fn validate_registration(&self, request: &RegisterPatientRequest) -> Result<(), PatientError> {
        if !reference::GENDER_OPTIONS.contains(&request.gender.as_str()) {
            return Err(PatientError::ValidationError(format!(
                "Unknown gender option: {}",
                request.gender
            )));
        }

        for (field, value) in [
            ("scholarship", &request.scholarship),
            ("hypertension", &request.hypertension),
            ("diabetes", &request.diabetes),
            ("alcoholism", &request.alcoholism),
            ("handicap", &request.handicap),
            ("sms_received", &request.sms_received),
        ] {
            if !reference::is_answer_code(value) {
                return Err(PatientError::ValidationError(format!(
                    "{} must be \"1\" or \"0\", got {:?}",
                    field, value
                )));
            }
        }

        if reference::find_doctor(&request.primary_physician).is_none() {
            return Err(PatientError::ValidationError(format!(
                "Unknown physician: {}",
                request.primary_physician
            )));
        }

        if let Some(identification_type) = &request.identification_type {
            if !reference::IDENTIFICATION_TYPES.contains(&identification_type.as_str()) {
                return Err(PatientError::ValidationError(format!(
                    "Unknown identification type: {}",
                    identification_type
                )));
            }
        }

        Ok(())
    }
}
