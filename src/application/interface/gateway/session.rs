use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::id::Id;
use crate::domain::entities::session::Session;

#[async_trait]
pub trait SessionReader: Send + Sync {
    async fn find(&self, session_id: &Id<Session>) -> AppResult<Option<Session>>;
}
