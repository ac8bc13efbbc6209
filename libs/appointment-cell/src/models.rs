use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// Lifecycle stage of an appointment. The set is closed; records whose
/// stored status falls outside it are tolerated on read but never written.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Scheduled,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Dashboard icon asset for this status.
    pub fn icon_path(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "/assets/icons/pending.svg",
            AppointmentStatus::Scheduled => "/assets/icons/check.svg",
            AppointmentStatus::Cancelled => "/assets/icons/cancelled.svg",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The caller's intent for a workflow invocation. Drives status derivation
/// and which request fields are required.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentRequestType {
    Create,
    Schedule,
    Cancel,
}

impl AppointmentRequestType {
    /// The status a request of this type persists. Total over all request
    /// types; callers cannot supply a status of their own.
    pub fn target_status(&self) -> AppointmentStatus {
        match self {
            AppointmentRequestType::Create => AppointmentStatus::Pending,
            AppointmentRequestType::Schedule => AppointmentStatus::Scheduled,
            AppointmentRequestType::Cancel => AppointmentStatus::Cancelled,
        }
    }
}

impl fmt::Display for AppointmentRequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentRequestType::Create => write!(f, "create"),
            AppointmentRequestType::Schedule => write!(f, "schedule"),
            AppointmentRequestType::Cancel => write!(f, "cancel"),
        }
    }
}

/// An appointment as stored in the document database. Demographic and
/// health fields are duplicated from the patient at booking time rather
/// than joined on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
    /// Patient document id.
    pub patient: String,
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
    pub age: i64,
    pub gender: String,
    pub neighbourhood: String,
    pub scholarship: String,
    pub hypertension: String,
    pub diabetes: String,
    pub alcoholism: String,
    pub handicap: String,
    pub sms_received: String,
    pub reason: String,
    pub note: Option<String>,
    pub cancellation_reason: Option<String>,
    pub status: AppointmentStatus,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient: String,
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
    pub age: i64,
    pub gender: String,
    pub neighbourhood: String,
    pub scholarship: String,
    pub hypertension: String,
    pub diabetes: String,
    pub alcoholism: String,
    pub handicap: String,
    pub sms_received: String,
    pub reason: String,
    pub note: Option<String>,
}

/// Schedule or cancel an existing appointment. Only physician, schedule,
/// status, and cancellation reason are ever changed on the stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub request_type: AppointmentRequestType,
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentCreated {
    pub appointment: Appointment,
    /// Success view the caller navigates to after resetting its form.
    pub redirect_to: String,
}

/// Dashboard listing: the full recent-first document list plus per-status
/// tallies recomputed on every read.
#[derive(Debug, Clone, Serialize)]
pub struct RecentAppointmentList {
    pub total: u64,
    pub scheduled_count: u64,
    pub pending_count: u64,
    pub cancelled_count: u64,
    pub documents: Vec<Value>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Request type {0} is not valid for this operation")]
    InvalidRequestType(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
