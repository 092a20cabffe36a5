use crate::{
    application::{
        app_error::{AppError, AppResult},
        dto::session::ValidateSessionDTO,
        interface::gateway::session::SessionReader,
    },
    domain::entities::{id::Id, profile::Profile, session::Session},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct ValidateSessionInteractor {
    session_reader: Arc<dyn SessionReader>,
}

impl ValidateSessionInteractor {
    pub fn new(session_reader: Arc<dyn SessionReader>) -> Self {
        Self { session_reader }
    }

    pub async fn execute(&self, dto: ValidateSessionDTO) -> AppResult<Id<Profile>> {
        let session_id: Id<Session> = dto
            .session_id
            .try_into()
            .map_err(|_| AppError::InvalidCredentials)?;

        let session = self
            .session_reader
            .find(&session_id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if session.is_expired(Utc::now()) {
            warn!("Expired session {} presented for user {}", session.id, session.user_id);
            return Err(AppError::InvalidCredentials);
        }

        Ok(session.user_id)
    }
}
