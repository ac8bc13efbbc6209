use serde::Serialize;

/// Request body for the EmailJS transactional send endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EmailSendRequest {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: TemplateParams,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub to_name: String,
    pub to_email: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Notification channel is not configured")]
    NotConfigured,

    #[error("Delivery failed: {message}")]
    DeliveryFailed { message: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}
