use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{Claim, ClaimDecision, ClaimStatus, NewClaim};
use crate::shared::validation::CONTACT_REGEX;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClaimDto {
    #[validate(regex(path = *CONTACT_REGEX, message = "contact must be a phone number or email"))]
    pub contact: String,
    pub additional_info: Option<String>,
}

impl CreateClaimDto {
    pub fn into_new_claim(self, claimant_id: String, proof_image_urls: Vec<String>) -> NewClaim {
        NewClaim {
            claimant_id,
            proof_image_urls,
            contact: self.contact,
            additional_info: self.additional_info,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResolveClaimDto {
    pub decision: ClaimDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClaimResponseDto {
    pub id: Uuid,
    pub report_id: Uuid,
    pub claimant_id: String,
    pub proof_image_urls: Vec<String>,
    pub contact: String,
    pub additional_info: Option<String>,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Claim> for ClaimResponseDto {
    fn from(c: Claim) -> Self {
        Self {
            id: c.id,
            report_id: c.report_id,
            claimant_id: c.claimant_id,
            proof_image_urls: c.proof_image_urls,
            contact: c.contact,
            additional_info: c.additional_info,
            status: c.status,
            created_at: c.created_at,
        }
    }
}
