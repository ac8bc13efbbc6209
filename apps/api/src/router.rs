use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::create_appointment_router;
use patient_cell::router::create_patient_router;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "CarePulse API is running!" }))
        .nest("/patients", create_patient_router(state.clone()))
        .nest("/appointments", create_appointment_router(state))
}
