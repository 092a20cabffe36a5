use async_trait::async_trait;
use futures::FutureExt;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row, Transaction};
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::link::{Link, LinkCollection};
use crate::domain::entities::profile::Profile;
use crate::domain::entities::theme::ThemeSettings;

#[derive(Clone)]
pub struct ProfileGateway {
    session: SqlxSession,
}

impl ProfileGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_profile(row: &PgRow, links: LinkCollection) -> AppResult<Profile> {
        let theme = ThemeSettings {
            page_background: row.try_get("page_background")?,
            button_style: row.try_get("button_style")?,
            font_family: row.try_get("font_family")?,
        };

        Ok(Profile {
            id: Id::new(row.try_get("id")?),
            username: row.try_get("username")?,
            name: row.try_get("name")?,
            bio: row.try_get("bio")?,
            avatar: row.try_get("avatar")?,
            theme: (!theme.is_empty()).then_some(theme),
            links,
        })
    }

    async fn fetch_links(tx: &mut Transaction<'static, Postgres>, user_id: Uuid) -> AppResult<LinkCollection> {
        let rows = sqlx::query(
            r#"
                SELECT
                    id, title, url, icon
                FROM
                    links
                WHERE user_id = $1
                ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(tx.as_mut())
        .await?;

        let links = rows
            .iter()
            .map(|row| {
                Ok(Link {
                    id: Id::new(row.try_get("id")?),
                    title: row.try_get("title")?,
                    url: row.try_get("url")?,
                    icon: row.try_get("icon")?,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(LinkCollection::from_links(links))
    }

    async fn find_profile(tx: &mut Transaction<'static, Postgres>, row: Option<PgRow>) -> AppResult<Option<Profile>> {
        match row {
            Some(row) => {
                let user_id: Uuid = row.try_get("id")?;
                let links = Self::fetch_links(tx, user_id).await?;
                Ok(Some(Self::get_profile(&row, links)?))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ProfileReader for ProfileGateway {
    async fn find_by_id(&self, profile_id: &Id<Profile>) -> AppResult<Option<Profile>> {
        self.session
            .with_tx(|tx| {
                let profile_id = profile_id.value;
                async move {
                    let row = sqlx::query(
                        r#"
                            SELECT
                                id, username, name, bio, avatar, page_background, button_style, font_family
                            FROM
                                users
                            WHERE id = $1
                        "#,
                    )
                    .bind(profile_id)
                    .fetch_optional(tx.as_mut())
                    .await?;

                    Self::find_profile(tx, row).await
                }
                .boxed()
            })
            .await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Profile>> {
        self.session
            .with_tx(|tx| {
                let username = username.to_owned();
                async move {
                    let row = sqlx::query(
                        r#"
                            SELECT
                                id, username, name, bio, avatar, page_background, button_style, font_family
                            FROM
                                users
                            WHERE lower(username) = lower($1)
                        "#,
                    )
                    .bind(&username)
                    .fetch_optional(tx.as_mut())
                    .await?;

                    Self::find_profile(tx, row).await
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl ProfileWriter for ProfileGateway {
    async fn update(&self, profile: &Profile) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let profile = profile.clone();
                async move {
                    let theme = profile.theme.unwrap_or_default();
                    sqlx::query(
                        r#"
                            UPDATE
                                users
                            SET
                                name = $2,
                                bio = $3,
                                avatar = $4,
                                page_background = $5,
                                button_style = $6,
                                font_family = $7,
                                updated_at = now()
                            WHERE
                                id = $1
                        "#,
                    )
                    .bind(profile.id.value)
                    .bind(&profile.name)
                    .bind(&profile.bio)
                    .bind(&profile.avatar)
                    .bind(&theme.page_background)
                    .bind(&theme.button_style)
                    .bind(&theme.font_family)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }
}
