use tracing::warn;

use shared_config::AppConfig;

use crate::models::VideoMeetingError;
use crate::services::zoom::ZoomMeetingClient;

/// Scoped failure boundary around meeting provisioning.
///
/// A provider outage must never abort an appointment submission, so every
/// failure degrades to "no link available" and is logged.
pub struct MeetingProvisioningService {
    config: AppConfig,
}

impl MeetingProvisioningService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub async fn provision_join_link(&self) -> Option<String> {
        match self.try_provision().await {
            Ok(join_url) => Some(join_url),
            Err(e) => {
                warn!("Meeting provisioning unavailable, continuing without a join link: {}", e);
                None
            }
        }
    }

    async fn try_provision(&self) -> Result<String, VideoMeetingError> {
        let client = ZoomMeetingClient::new(&self.config)?;
        let token = client.acquire_access_token().await?;
        client.create_instant_meeting(&token).await
    }
}
