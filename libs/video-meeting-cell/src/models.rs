use serde::{Deserialize, Serialize};

/// OAuth token response from the Zoom account-credentials grant.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoomTokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMeetingRequest {
    pub topic: String,
    /// Zoom meeting type; 1 = instant meeting.
    #[serde(rename = "type")]
    pub meeting_type: u8,
    pub settings: MeetingSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeetingSettings {
    pub host_video: bool,
    pub participant_video: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoomMeetingResponse {
    pub id: Option<u64>,
    pub join_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum VideoMeetingError {
    #[error("Video meeting provider is not configured")]
    NotConfigured,

    #[error("OAuth token request failed: {message}")]
    OAuth { message: String },

    #[error("Meeting API request failed: {message}")]
    MeetingApi { message: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}
