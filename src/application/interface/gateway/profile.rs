use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;

/// Reads return the profile with its links in display order.
#[async_trait]
pub trait ProfileReader: Send + Sync {
    async fn find_by_id(&self, profile_id: &Id<Profile>) -> AppResult<Option<Profile>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Profile>>;
}

#[async_trait]
pub trait ProfileWriter: Send + Sync {
    async fn update(&self, profile: &Profile) -> AppResult<()>;
}
