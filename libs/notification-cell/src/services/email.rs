use reqwest::Client;
use tracing::{debug, error, warn};

use shared_config::AppConfig;

use crate::models::{EmailSendRequest, NotificationError, TemplateParams};

/// Email dispatch through an EmailJS-style transactional channel.
///
/// Sender identity and the single operator recipient come from configuration.
/// `notify` is fire-and-forget: delivery failures are logged and swallowed,
/// never surfaced to the caller.
pub struct EmailNotificationService {
    client: Client,
    config: AppConfig,
}

impl EmailNotificationService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    pub async fn notify(&self, message: &str) {
        if let Err(e) = self.send(message).await {
            warn!("Notification delivery failed, ignoring: {}", e);
        }
    }

    pub async fn send(&self, message: &str) -> Result<(), NotificationError> {
        if !self.config.is_notification_configured() {
            return Err(NotificationError::NotConfigured);
        }

        debug!("Dispatching notification to {}", self.config.notification_recipient_email);

        let request_body = EmailSendRequest {
            service_id: self.config.emailjs_service_id.clone(),
            template_id: self.config.emailjs_template_id.clone(),
            user_id: self.config.emailjs_public_key.clone(),
            template_params: TemplateParams {
                from_name: self.config.notification_sender_name.clone(),
                from_email: self.config.notification_sender_email.clone(),
                to_name: self.config.notification_recipient_name.clone(),
                to_email: self.config.notification_recipient_email.clone(),
                message: message.to_string(),
            },
        };

        let response = self
            .client
            .post(&self.config.emailjs_api_url)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Email delivery failed: {} - {}", status, error_text);
            return Err(NotificationError::DeliveryFailed {
                message: format!("HTTP {}: {}", status, error_text),
            });
        }

        debug!("Notification delivered");
        Ok(())
    }
}
