use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::link::LinkWriter;
use crate::domain::entities::id::Id;
use crate::domain::entities::link::Link;
use crate::domain::entities::profile::Profile;

#[derive(Clone)]
pub struct LinkGateway {
    session: SqlxSession,
}

impl LinkGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }
}

#[async_trait]
impl LinkWriter for LinkGateway {
    async fn insert(&self, owner_id: &Id<Profile>, link: Link) -> AppResult<Id<Link>> {
        self.session
            .with_tx(|tx| {
                let owner_id = owner_id.value;
                async move {
                    let result = sqlx::query(
                        r#"
                            INSERT INTO links
                                (id, user_id, title, url, icon, created_at)
                            VALUES
                                ($1, $2, $3, $4, $5, now())
                            RETURNING
                                id
                        "#,
                    )
                    .bind(link.id.value)
                    .bind(owner_id)
                    .bind(&link.title)
                    .bind(&link.url)
                    .bind(&link.icon)
                    .fetch_one(tx.as_mut())
                    .await?;
                    let id: Uuid = result.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn update(&self, owner_id: &Id<Profile>, link: &Link) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let owner_id = owner_id.value;
                let link = link.clone();
                async move {
                    let result = sqlx::query(
                        r#"
                            UPDATE
                                links
                            SET
                                title = $3, url = $4, icon = $5
                            WHERE
                                id = $1 AND user_id = $2
                        "#,
                    )
                    .bind(link.id.value)
                    .bind(owner_id)
                    .bind(&link.title)
                    .bind(&link.url)
                    .bind(&link.icon)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(result.rows_affected() > 0)
                }
                .boxed()
            })
            .await
    }

    async fn delete(&self, owner_id: &Id<Profile>, link_id: &Id<Link>) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let owner_id = owner_id.value;
                let link_id = link_id.value;
                async move {
                    let result = sqlx::query("DELETE FROM links WHERE id = $1 AND user_id = $2")
                        .bind(link_id)
                        .bind(owner_id)
                        .execute(tx.as_mut())
                        .await?;
                    Ok(result.rows_affected() > 0)
                }
                .boxed()
            })
            .await
    }
}
