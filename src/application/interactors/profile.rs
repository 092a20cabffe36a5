use std::sync::Arc;

use tracing::info;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::profile::{GetProfileDTO, GetPublicProfileDTO, UpdateProfileDTO};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::{Profile, ProfileUpdate};
use crate::domain::entities::theme::ThemeSettings;
use crate::domain::render::{ProfileResolver, ProfileView, RemoteRecord};

#[derive(Clone)]
pub struct GetPublicProfileInteractor {
    profile_reader: Arc<dyn ProfileReader>,
}

impl GetPublicProfileInteractor {
    pub fn new(profile_reader: Arc<dyn ProfileReader>) -> Self {
        Self { profile_reader }
    }

    pub async fn execute(&self, dto: GetPublicProfileDTO) -> AppResult<Option<Profile>> {
        self.profile_reader.find_by_username(dto.username.trim()).await
    }
}

/// Public page: the stored record run through the resolver.
#[derive(Clone)]
pub struct GetPublicPageInteractor {
    profile_reader: Arc<dyn ProfileReader>,
}

impl GetPublicPageInteractor {
    pub fn new(profile_reader: Arc<dyn ProfileReader>) -> Self {
        Self { profile_reader }
    }

    pub async fn execute(&self, dto: GetPublicProfileDTO) -> AppResult<ProfileView> {
        let record: RemoteRecord = self.profile_reader.find_by_username(dto.username.trim()).await?.into();
        Ok(ProfileResolver::resolve(&record))
    }
}

#[derive(Clone)]
pub struct GetMeInteractor {
    profile_reader: Arc<dyn ProfileReader>,
}

impl GetMeInteractor {
    pub fn new(profile_reader: Arc<dyn ProfileReader>) -> Self {
        Self { profile_reader }
    }

    pub async fn execute(&self, dto: GetProfileDTO) -> AppResult<Profile> {
        let user_id: Id<Profile> = dto.user_id.try_into()?;
        self.profile_reader
            .find_by_id(&user_id)
            .await?
            .ok_or(AppError::ProfileNotFound)
    }
}

#[derive(Clone)]
pub struct UpdateProfileInteractor {
    db_session: Arc<dyn DBSession>,
    profile_reader: Arc<dyn ProfileReader>,
    profile_writer: Arc<dyn ProfileWriter>,
}

impl UpdateProfileInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        profile_reader: Arc<dyn ProfileReader>,
        profile_writer: Arc<dyn ProfileWriter>,
    ) -> Self {
        Self {
            db_session,
            profile_reader,
            profile_writer,
        }
    }

    pub async fn execute(&self, dto: UpdateProfileDTO) -> AppResult<Profile> {
        let user_id: Id<Profile> = dto.user_id.try_into()?;

        let theme = dto.theme.map(|theme| ThemeSettings {
            page_background: theme.page_background,
            button_style: theme.button_style,
            font_family: theme.font_family,
        });
        if let Some(theme) = &theme {
            theme.validate()?;
        }

        let mut profile = self
            .profile_reader
            .find_by_id(&user_id)
            .await?
            .ok_or(AppError::ProfileNotFound)?;

        profile.apply_update(ProfileUpdate {
            name: dto.name,
            bio: dto.bio,
            avatar: dto.avatar,
            theme,
        });

        self.profile_writer.update(&profile).await?;
        self.db_session.commit().await?;
        info!("Profile of {} updated", profile.username);

        Ok(profile)
    }
}
