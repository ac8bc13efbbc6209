use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, info};

use notification_cell::services::EmailNotificationService;
use shared_config::AppConfig;
use shared_database::AppwriteClient;
use shared_models::auth::User;
use shared_models::reference;
use video_meeting_cell::services::MeetingProvisioningService;

use crate::models::{
    Appointment, AppointmentCreated, AppointmentError, AppointmentRequestType, AppointmentStatus,
    CreateAppointmentRequest, UpdateAppointmentRequest,
};

/// Display format for schedule times in notification messages,
/// e.g. "Jan 5, 2026, 9:30 AM".
const SCHEDULE_DISPLAY_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

/// The appointment status-transition workflow.
///
/// Maps a request type to its target status, persists the change, and
/// orchestrates the side effects: a video meeting link is provisioned only
/// for the schedule transition (behind a boundary that degrades to no link),
/// and an update notification is dispatched fire-and-forget. Only a store
/// write failure fails the operation.
pub struct AppointmentWorkflowService {
    appwrite: AppwriteClient,
    collection_id: String,
    provisioning: MeetingProvisioningService,
    notifier: EmailNotificationService,
}

impl AppointmentWorkflowService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            appwrite: AppwriteClient::new(config),
            collection_id: config.appwrite_appointment_collection_id.clone(),
            provisioning: MeetingProvisioningService::new(config),
            notifier: EmailNotificationService::new(config),
        }
    }

    /// Create a new appointment request in `pending` status.
    ///
    /// The status is derived, never caller-supplied. On success the caller
    /// receives the stored record and the success view to navigate to; a
    /// store failure propagates and no redirect is emitted.
    pub async fn create_appointment(
        &self,
        user: &User,
        request: CreateAppointmentRequest,
    ) -> Result<AppointmentCreated, AppointmentError> {
        info!("Creating appointment for patient {}", request.patient);

        self.validate_physician(&request.primary_physician)?;
        if request.reason.trim().is_empty() {
            return Err(AppointmentError::ValidationError(
                "Appointment reason is required".to_string(),
            ));
        }

        let status = AppointmentRequestType::Create.target_status();

        let appointment_data = json!({
            "user_id": user.id,
            "patient": request.patient,
            "primary_physician": request.primary_physician,
            "schedule": request.schedule,
            "age": request.age,
            "gender": request.gender,
            "neighbourhood": request.neighbourhood,
            "scholarship": request.scholarship,
            "hypertension": request.hypertension,
            "diabetes": request.diabetes,
            "alcoholism": request.alcoholism,
            "handicap": request.handicap,
            "sms_received": request.sms_received,
            "reason": request.reason,
            "note": request.note,
            "cancellation_reason": null,
            "status": status,
        });

        let created = self
            .appwrite
            .create_document(&self.collection_id, appointment_data)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let appointment: Appointment = serde_json::from_value(created)
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let redirect_to = format!(
            "/patients/{}/new-appointment/success?appointmentId={}",
            user.id, appointment.id
        );

        info!("Appointment {} created in {} status", appointment.id, appointment.status);
        Ok(AppointmentCreated {
            appointment,
            redirect_to,
        })
    }

    /// Schedule or cancel an existing appointment.
    ///
    /// The update changes only physician, schedule time, status, and
    /// cancellation reason; there is no concurrency token, so a concurrent
    /// update to the same id silently overwrites (last write wins). The
    /// notification outcome never affects the result.
    pub async fn update_appointment(
        &self,
        appointment_id: &str,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let status = match request.request_type {
            AppointmentRequestType::Create => {
                return Err(AppointmentError::InvalidRequestType(
                    request.request_type.to_string(),
                ));
            }
            other => other.target_status(),
        };

        info!("Updating appointment {} to {} status", appointment_id, status);

        self.validate_physician(&request.primary_physician)?;
        if status == AppointmentStatus::Cancelled
            && request.cancellation_reason.as_deref().map_or(true, |r| r.trim().is_empty())
        {
            return Err(AppointmentError::ValidationError(
                "Cancellation reason is required".to_string(),
            ));
        }

        // Provisioning is gated on the schedule transition and degrades to
        // None on provider failure; create/cancel paths never touch it.
        let join_link = if status == AppointmentStatus::Scheduled {
            self.provisioning.provision_join_link().await
        } else {
            None
        };

        let update_data = json!({
            "primary_physician": request.primary_physician,
            "schedule": request.schedule,
            "status": status,
            "cancellation_reason": request.cancellation_reason,
        });

        let updated = self
            .appwrite
            .update_document(&self.collection_id, appointment_id, update_data)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let appointment: Appointment = serde_json::from_value(updated)
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let message = compose_update_message(&request, join_link.as_deref());
        debug!("Dispatching appointment notification: {}", message);
        self.notifier.notify(&message).await;

        Ok(appointment)
    }

    pub async fn get_appointment(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        debug!("Fetching appointment {}", appointment_id);

        let document = self
            .appwrite
            .get_document(&self.collection_id, appointment_id)
            .await
            .map_err(|_| AppointmentError::NotFound)?;

        let appointment: Appointment = serde_json::from_value(document)
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        Ok(appointment)
    }

    fn validate_physician(&self, name: &str) -> Result<(), AppointmentError> {
        if reference::find_doctor(name).is_none() {
            return Err(AppointmentError::ValidationError(format!(
                "Unknown physician: {}",
                name
            )));
        }
        Ok(())
    }
}

pub fn format_schedule(schedule: &DateTime<Utc>) -> String {
    schedule.format(SCHEDULE_DISPLAY_FORMAT).to_string()
}

/// Human-readable message for a schedule/cancel transition.
fn compose_update_message(request: &UpdateAppointmentRequest, join_link: Option<&str>) -> String {
    let schedule_display = format_schedule(&request.schedule);

    match request.request_type {
        AppointmentRequestType::Cancel => format!(
            "Greetings from CarePulse. We regret to inform that your appointment for {} is cancelled. Reason: {}.",
            schedule_display,
            request.cancellation_reason.as_deref().unwrap_or(""),
        ),
        _ => {
            let mut message = format!(
                "Greetings from CarePulse. Your appointment is confirmed for {} with Dr. {}.",
                schedule_display, request.primary_physician,
            );
            if let Some(link) = join_link {
                message.push_str(&format!(
                    " Here is the video meeting link for your appointment: {}",
                    link
                ));
            }
            message
        }
    }
}
