use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::store::Document;

/// Profile document from the `users` collection.
///
/// Owned by the account system; this service reads it only to resolve
/// display identities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: String,
    pub full_name: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl Document for UserProfile {
    fn id(&self) -> Uuid {
        self.id
    }
}
