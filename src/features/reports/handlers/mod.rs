pub mod claim_handler;
mod multipart;
pub mod report_handler;
pub mod sighting_handler;
