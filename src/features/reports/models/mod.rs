mod claim;
mod report;
mod sighting;

pub use claim::{Claim, ClaimDecision, ClaimStatus, NewClaim};
pub use report::{Coordinates, NewReport, PetGender, PetReport, ReportKind, ReportStatus};
pub use sighting::{NewSighting, Sighting};
