use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::users::models::UserProfile;
use crate::modules::store::DocumentCollection;
use crate::shared::constants::ANONYMOUS_DISPLAY_NAME;

/// Read-only lookup boundary over the `users` collection.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;
}

/// Directory backed by the document store's `users` collection
pub struct StoreUserDirectory {
    users: Arc<DocumentCollection<UserProfile>>,
}

impl StoreUserDirectory {
    pub fn new(users: Arc<DocumentCollection<UserProfile>>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserDirectory for StoreUserDirectory {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.users.find(|p| p.user_id == user_id))
    }
}

/// Display identity attached to feed items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl ResolvedIdentity {
    pub fn anonymous() -> Self {
        Self {
            display_name: ANONYMOUS_DISPLAY_NAME.to_string(),
            avatar_url: None,
        }
    }
}

/// Maps a user id to a display identity with graceful degradation.
///
/// Resolution never fails: a lookup error or a missing profile yields the
/// anonymous identity so feed rendering is never blocked.
pub struct IdentityResolver {
    directory: Arc<dyn UserDirectory>,
}

impl IdentityResolver {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    pub async fn resolve(&self, user_id: &str) -> ResolvedIdentity {
        match self.directory.get_profile(user_id).await {
            Ok(Some(profile)) => {
                let display_name = profile
                    .display_name
                    .or(profile.full_name)
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| ANONYMOUS_DISPLAY_NAME.to_string());

                ResolvedIdentity {
                    display_name,
                    avatar_url: profile.photo_url,
                }
            }
            Ok(None) => ResolvedIdentity::anonymous(),
            Err(e) => {
                tracing::warn!("Identity lookup failed for {}: {}", user_id, e);
                ResolvedIdentity::anonymous()
            }
        }
    }
}
