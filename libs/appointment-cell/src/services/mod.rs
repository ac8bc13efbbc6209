pub mod reporting;
pub mod workflow;

pub use reporting::AppointmentReportingService;
pub use workflow::AppointmentWorkflowService;
