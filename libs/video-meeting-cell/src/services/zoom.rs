use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::models::{
    CreateMeetingRequest, MeetingSettings, VideoMeetingError, ZoomMeetingResponse,
    ZoomTokenResponse,
};

/// Zoom API client for provisioning instant meeting links.
///
/// Uses the server-to-server OAuth account-credentials grant: a short-lived
/// bearer token is exchanged for every provisioning attempt, then a type-1
/// (instant) meeting is created under the account user.
#[derive(Debug)]
pub struct ZoomMeetingClient {
    client: Client,
    client_id: String,
    client_secret: String,
    account_id: String,
    oauth_url: String,
    api_base_url: String,
}

impl ZoomMeetingClient {
    pub fn new(config: &AppConfig) -> Result<Self, VideoMeetingError> {
        if !config.is_video_meeting_configured() {
            return Err(VideoMeetingError::NotConfigured);
        }

        Ok(Self {
            client: Client::new(),
            client_id: config.zoom_client_id.clone(),
            client_secret: config.zoom_client_secret.clone(),
            account_id: config.zoom_account_id.clone(),
            oauth_url: config.zoom_oauth_url.clone(),
            api_base_url: config.zoom_api_base_url.clone(),
        })
    }

    fn basic_credentials(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret))
    }

    /// Exchange client credentials for a short-lived bearer token.
    pub async fn acquire_access_token(&self) -> Result<String, VideoMeetingError> {
        debug!("Requesting Zoom access token from {}", self.oauth_url);

        let response = self
            .client
            .post(&self.oauth_url)
            .header("Authorization", format!("Basic {}", self.basic_credentials()))
            .form(&[
                ("grant_type", "account_credentials"),
                ("account_id", self.account_id.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            error!("Zoom token request failed: {} - {}", status, message);
            return Err(VideoMeetingError::OAuth { message });
        }

        let token: ZoomTokenResponse =
            serde_json::from_value(body).map_err(|e| VideoMeetingError::OAuth {
                message: format!("Failed to parse token response: {}", e),
            })?;

        debug!("Zoom access token acquired");
        Ok(token.access_token)
    }

    /// Create an instant meeting and return its join URL.
    pub async fn create_instant_meeting(
        &self,
        access_token: &str,
    ) -> Result<String, VideoMeetingError> {
        let url = format!("{}/users/me/meetings", self.api_base_url);
        debug!("Creating instant meeting at {}", url);

        let request_body = CreateMeetingRequest {
            topic: "CarePulse Appointment".to_string(),
            meeting_type: 1,
            settings: MeetingSettings {
                host_video: true,
                participant_video: true,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!("Zoom meeting creation failed: {} - {}", status, response_text);
            return Err(VideoMeetingError::MeetingApi {
                message: format!("HTTP {}: {}", status, response_text),
            });
        }

        let meeting: ZoomMeetingResponse =
            serde_json::from_str(&response_text).map_err(|e| VideoMeetingError::MeetingApi {
                message: format!("Failed to parse meeting response: {}", e),
            })?;

        info!("Created instant meeting with join URL");
        Ok(meeting.join_url)
    }
}
