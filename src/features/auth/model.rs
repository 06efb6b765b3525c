use serde::{Deserialize, Serialize};

/// Identity supplied by the external auth collaborator.
///
/// The core only reads the current user id and the email-verification flag;
/// session lifecycle lives entirely outside this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email_verified: bool,
}
