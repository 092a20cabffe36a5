use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::id::Id;
use crate::domain::entities::link::Link;
use crate::domain::entities::profile::Profile;

#[async_trait]
pub trait LinkWriter: Send + Sync {
    async fn insert(&self, owner_id: &Id<Profile>, link: Link) -> AppResult<Id<Link>>;
    /// Returns `false` when the link does not exist or has another owner.
    async fn update(&self, owner_id: &Id<Profile>, link: &Link) -> AppResult<bool>;
    /// Returns `false` when the link does not exist or has another owner.
    async fn delete(&self, owner_id: &Id<Profile>, link_id: &Id<Link>) -> AppResult<bool>;
}
