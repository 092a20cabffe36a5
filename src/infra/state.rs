use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use sqlx::{Pool, Postgres};

use crate::adapter::db::gateway::link::LinkGateway;
use crate::adapter::db::gateway::profile::ProfileGateway;
use crate::adapter::db::gateway::session::SessionGateway;
use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interactors::avatar::{GetMediaInteractor, UploadAvatarInteractor};
use crate::application::interactors::link::{CreateLinkInteractor, DeleteLinkInteractor, UpdateLinkInteractor};
use crate::application::interactors::profile::{
    GetMeInteractor, GetPublicPageInteractor, GetPublicProfileInteractor, UpdateProfileInteractor,
};
use crate::application::interactors::session::ValidateSessionInteractor;
use crate::application::interface::s3::StorageClient;
use crate::infra::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: Pool<Postgres>,
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn StorageClient>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

#[async_trait]
pub trait FromAppState: Sized {
    async fn from_app_state(state: &AppState) -> AppResult<Self>;
}

/// Lets a handler take an interactor as an argument.
macro_rules! interactor_from_request_parts {
    ($($interactor:ty),+ $(,)?) => {
        $(
            impl<S> FromRequestParts<S> for $interactor
            where
                S: Send + Sync,
                AppState: FromRef<S>,
            {
                type Rejection = AppError;

                async fn from_request_parts(_parts: &mut Parts, state: &S) -> AppResult<Self> {
                    let app_state = AppState::from_ref(state);
                    <$interactor>::from_app_state(&app_state).await
                }
            }
        )+
    };
}

interactor_from_request_parts!(
    ValidateSessionInteractor,
    GetPublicProfileInteractor,
    GetPublicPageInteractor,
    GetMeInteractor,
    UpdateProfileInteractor,
    CreateLinkInteractor,
    UpdateLinkInteractor,
    DeleteLinkInteractor,
    UploadAvatarInteractor,
    GetMediaInteractor,
);

// ValidateSessionInteractor
#[async_trait]
impl FromAppState for ValidateSessionInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let session_gateway = SessionGateway::new(session);

        Ok(ValidateSessionInteractor::new(Arc::new(session_gateway)))
    }
}

// GetPublicProfileInteractor
#[async_trait]
impl FromAppState for GetPublicProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let profile_gateway = ProfileGateway::new(session);

        Ok(GetPublicProfileInteractor::new(Arc::new(profile_gateway)))
    }
}

// GetPublicPageInteractor
#[async_trait]
impl FromAppState for GetPublicPageInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let profile_gateway = ProfileGateway::new(session);

        Ok(GetPublicPageInteractor::new(Arc::new(profile_gateway)))
    }
}

// GetMeInteractor
#[async_trait]
impl FromAppState for GetMeInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let profile_gateway = ProfileGateway::new(session);

        Ok(GetMeInteractor::new(Arc::new(profile_gateway)))
    }
}

// UpdateProfileInteractor
#[async_trait]
impl FromAppState for UpdateProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let profile_gateway = ProfileGateway::new(session.clone());

        Ok(UpdateProfileInteractor::new(
            Arc::new(session),
            Arc::new(profile_gateway.clone()),
            Arc::new(profile_gateway),
        ))
    }
}

// CreateLinkInteractor
#[async_trait]
impl FromAppState for CreateLinkInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let link_gateway = LinkGateway::new(session.clone());

        Ok(CreateLinkInteractor::new(Arc::new(session), Arc::new(link_gateway)))
    }
}

// UpdateLinkInteractor
#[async_trait]
impl FromAppState for UpdateLinkInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let link_gateway = LinkGateway::new(session.clone());

        Ok(UpdateLinkInteractor::new(Arc::new(session), Arc::new(link_gateway)))
    }
}

// DeleteLinkInteractor
#[async_trait]
impl FromAppState for DeleteLinkInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = SqlxSession::new_lazy(state.pool.clone());
        let link_gateway = LinkGateway::new(session.clone());

        Ok(DeleteLinkInteractor::new(Arc::new(session), Arc::new(link_gateway)))
    }
}

// UploadAvatarInteractor
#[async_trait]
impl FromAppState for UploadAvatarInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(UploadAvatarInteractor::new(
            state.storage.clone(),
            state.config.s3.bucket.clone(),
            state.config.application.public_base_url.clone(),
        ))
    }
}

// GetMediaInteractor
#[async_trait]
impl FromAppState for GetMediaInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(GetMediaInteractor::new(state.storage.clone(), state.config.s3.bucket.clone()))
    }
}
