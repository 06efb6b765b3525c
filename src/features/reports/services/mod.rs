mod lifecycle_service;
mod submission_service;

pub use lifecycle_service::ReportLifecycleService;
pub use submission_service::SubmissionService;
