mod claim_dto;
mod report_dto;
mod sighting_dto;

pub use claim_dto::{ClaimResponseDto, CreateClaimDto, ResolveClaimDto};
pub use report_dto::{CreateReportDto, ReportDetailResponseDto, ReportResponseDto};
pub use sighting_dto::{CreateSightingDto, ReviewSightingDto, SightingResponseDto};
