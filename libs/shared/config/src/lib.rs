use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub appwrite_endpoint: String,
    pub appwrite_project_id: String,
    pub appwrite_api_key: String,
    pub appwrite_database_id: String,
    pub appwrite_patient_collection_id: String,
    pub appwrite_appointment_collection_id: String,
    pub appwrite_storage_bucket_id: String,
    pub auth_jwt_secret: String,
    pub zoom_client_id: String,
    pub zoom_client_secret: String,
    pub zoom_account_id: String,
    pub zoom_oauth_url: String,
    pub zoom_api_base_url: String,
    pub emailjs_api_url: String,
    pub emailjs_service_id: String,
    pub emailjs_template_id: String,
    pub emailjs_public_key: String,
    pub notification_sender_name: String,
    pub notification_sender_email: String,
    pub notification_recipient_name: String,
    pub notification_recipient_email: String,
}

fn required_var(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!("{} not set, using empty value", name);
        String::new()
    })
}

fn var_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!("{} not set, using default", name);
        default.to_string()
    })
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            appwrite_endpoint: var_or_default("APPWRITE_ENDPOINT", "https://cloud.appwrite.io/v1"),
            appwrite_project_id: required_var("APPWRITE_PROJECT_ID"),
            appwrite_api_key: required_var("APPWRITE_API_KEY"),
            appwrite_database_id: required_var("APPWRITE_DATABASE_ID"),
            appwrite_patient_collection_id: required_var("APPWRITE_PATIENT_COLLECTION_ID"),
            appwrite_appointment_collection_id: required_var("APPWRITE_APPOINTMENT_COLLECTION_ID"),
            appwrite_storage_bucket_id: required_var("APPWRITE_STORAGE_BUCKET_ID"),
            auth_jwt_secret: required_var("AUTH_JWT_SECRET"),
            zoom_client_id: required_var("ZOOM_CLIENT_ID"),
            zoom_client_secret: required_var("ZOOM_CLIENT_SECRET"),
            zoom_account_id: required_var("ZOOM_ACCOUNT_ID"),
            zoom_oauth_url: var_or_default("ZOOM_OAUTH_URL", "https://zoom.us/oauth/token"),
            zoom_api_base_url: var_or_default("ZOOM_API_BASE_URL", "https://api.zoom.us/v2"),
            emailjs_api_url: var_or_default(
                "EMAILJS_API_URL",
                "https://api.emailjs.com/api/v1.0/email/send",
            ),
            emailjs_service_id: required_var("EMAILJS_SERVICE_ID"),
            emailjs_template_id: required_var("EMAILJS_TEMPLATE_ID"),
            emailjs_public_key: required_var("EMAILJS_PUBLIC_KEY"),
            notification_sender_name: var_or_default("NOTIFICATION_SENDER_NAME", "CarePulse"),
            notification_sender_email: required_var("NOTIFICATION_SENDER_EMAIL"),
            notification_recipient_name: var_or_default("NOTIFICATION_RECIPIENT_NAME", "CarePulse Operator"),
            notification_recipient_email: required_var("NOTIFICATION_RECIPIENT_EMAIL"),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.appwrite_endpoint.is_empty()
            && !self.appwrite_project_id.is_empty()
            && !self.appwrite_api_key.is_empty()
            && !self.appwrite_database_id.is_empty()
            && !self.auth_jwt_secret.is_empty()
    }

    pub fn is_video_meeting_configured(&self) -> bool {
        !self.zoom_client_id.is_empty()
            && !self.zoom_client_secret.is_empty()
            && !self.zoom_account_id.is_empty()
            && !self.zoom_oauth_url.is_empty()
            && !self.zoom_api_base_url.is_empty()
    }

    pub fn is_notification_configured(&self) -> bool {
        !self.emailjs_api_url.is_empty()
            && !self.emailjs_service_id.is_empty()
            && !self.emailjs_template_id.is_empty()
            && !self.emailjs_public_key.is_empty()
            && !self.notification_recipient_email.is_empty()
    }
}
