use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::AppwriteClient;

use crate::models::{AppointmentError, RecentAppointmentList};

/// Dashboard view over the appointment store: the full recent-first listing
/// with per-status tallies recomputed on every read. No pagination, no
/// filtering, no server-side aggregation.
pub struct AppointmentReportingService {
    appwrite: AppwriteClient,
    collection_id: String,
}

impl AppointmentReportingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            appwrite: AppwriteClient::new(config),
            collection_id: config.appwrite_appointment_collection_id.clone(),
        }
    }

    pub async fn recent_appointments(&self) -> Result<RecentAppointmentList, AppointmentError> {
        debug!("Listing recent appointments");

        let list = self
            .appwrite
            .list_documents(&self.collection_id, &[r#"orderDesc("$createdAt")"#])
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let (scheduled_count, pending_count, cancelled_count) = tally_statuses(&list.documents);

        Ok(RecentAppointmentList {
            total: list.total,
            scheduled_count,
            pending_count,
            cancelled_count,
            documents: list.documents,
        })
    }
}

/// Single linear scan over the listing. A status outside the closed set
/// falls into no bucket; the record still counts toward the total.
fn tally_statuses(documents: &[Value]) -> (u64, u64, u64) {
    let mut scheduled_count = 0;
    let mut pending_count = 0;
    let mut cancelled_count = 0;

    for document in documents {
        match document.get("status").and_then(Value::as_str) {
            Some("scheduled") => scheduled_count += 1,
            Some("pending") => pending_count += 1,
            Some("cancelled") => cancelled_count += 1,
            _ => {}
        }
    }

    (scheduled_count, pending_count, cancelled_count)
}
