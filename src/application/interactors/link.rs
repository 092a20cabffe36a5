use std::sync::Arc;

use tracing::info;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::link::{CreateLinkDTO, DeleteLinkDTO, UpdateLinkDTO};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::link::LinkWriter;
use crate::domain::entities::id::Id;
use crate::domain::entities::link::{Link, NewLink};
use crate::domain::entities::profile::Profile;

#[derive(Clone)]
pub struct CreateLinkInteractor {
    db_session: Arc<dyn DBSession>,
    link_writer: Arc<dyn LinkWriter>,
}

impl CreateLinkInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, link_writer: Arc<dyn LinkWriter>) -> Self {
        Self {
            db_session,
            link_writer,
        }
    }

    pub async fn execute(&self, dto: CreateLinkDTO) -> AppResult<Link> {
        let owner_id: Id<Profile> = dto.user_id.try_into()?;
        let new_link = NewLink::new(&dto.title, &dto.url, dto.icon.as_deref()).ok_or(AppError::EmptyLink)?;

        let link = Link::new(new_link);
        self.link_writer.insert(&owner_id, link.clone()).await?;
        self.db_session.commit().await?;
        info!("Link {} created for {}", link.id, owner_id);

        Ok(link)
    }
}

#[derive(Clone)]
pub struct UpdateLinkInteractor {
    db_session: Arc<dyn DBSession>,
    link_writer: Arc<dyn LinkWriter>,
}

impl UpdateLinkInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, link_writer: Arc<dyn LinkWriter>) -> Self {
        Self {
            db_session,
            link_writer,
        }
    }

    pub async fn execute(&self, dto: UpdateLinkDTO) -> AppResult<Link> {
        let owner_id: Id<Profile> = dto.user_id.try_into()?;
        let link_id: Id<Link> = dto.link_id.try_into()?;
        let new_link = NewLink::new(&dto.title, &dto.url, dto.icon.as_deref()).ok_or(AppError::EmptyLink)?;

        let link = Link {
            id: link_id,
            title: new_link.title,
            url: new_link.url,
            icon: new_link.icon,
        };

        if !self.link_writer.update(&owner_id, &link).await? {
            return Err(AppError::LinkNotFound);
        }
        self.db_session.commit().await?;

        Ok(link)
    }
}

#[derive(Clone)]
pub struct DeleteLinkInteractor {
    db_session: Arc<dyn DBSession>,
    link_writer: Arc<dyn LinkWriter>,
}

impl DeleteLinkInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, link_writer: Arc<dyn LinkWriter>) -> Self {
        Self {
            db_session,
            link_writer,
        }
    }

    pub async fn execute(&self, dto: DeleteLinkDTO) -> AppResult<()> {
        let owner_id: Id<Profile> = dto.user_id.try_into()?;
        let link_id: Id<Link> = dto.link_id.try_into()?;

        if !self.link_writer.delete(&owner_id, &link_id).await? {
            return Err(AppError::LinkNotFound);
        }
        self.db_session.commit().await?;
        info!("Link {} deleted for {}", link_id, owner_id);

        Ok(())
    }
}
