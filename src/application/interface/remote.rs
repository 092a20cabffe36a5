//! Collaborators the dashboard controller talks to. Implementations may sit
//! behind any transport; the controller only sees these contracts.

use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::application::dto::dashboard::{AvatarFile, DashboardSession};
use crate::domain::entities::id::Id;
use crate::domain::entities::link::{Link, NewLink};
use crate::domain::entities::profile::{Profile, ProfileUpdate};

#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// `Ok(None)` means the subject does not exist.
    async fn fetch_profile_by_username(&self, username: &str) -> AppResult<Option<Profile>>;
    async fn fetch_current_user_record(&self, session: &DashboardSession) -> AppResult<Profile>;
}

#[async_trait]
pub trait ProfileRemote: Send + Sync {
    async fn create_link(&self, session: &DashboardSession, link: NewLink) -> AppResult<Link>;
    async fn update_link(&self, session: &DashboardSession, link_id: &Id<Link>, link: NewLink) -> AppResult<Link>;
    async fn delete_link(&self, session: &DashboardSession, link_id: &Id<Link>) -> AppResult<()>;
    async fn update_profile(&self, session: &DashboardSession, update: ProfileUpdate) -> AppResult<Profile>;
}

#[async_trait]
pub trait AvatarUploader: Send + Sync {
    /// Stores the file for the session's user and returns its public URL.
    async fn upload_avatar_file(&self, session: &DashboardSession, file: AvatarFile) -> AppResult<String>;
}
