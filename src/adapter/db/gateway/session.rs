use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::session::SessionReader;
use crate::domain::entities::id::Id;
use crate::domain::entities::session::Session;

const FIND_SESSION: &str = r#"
    SELECT
        s.id, s.user_id, s.created_at, s.expires_at
    FROM
        sessions s
    WHERE s.id = $1
"#;

/// Read side of the sessions issued at sign-in. Expiry is judged by the
/// caller.
pub struct SessionGateway {
    session: SqlxSession,
}

impl SessionGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_session(row: &PgRow) -> AppResult<Session> {
        Ok(Session {
            id: Id::new(row.try_get("id")?),
            user_id: Id::new(row.try_get("user_id")?),
            created_at: row.try_get("created_at")?,
            expires_at: row.try_get("expires_at")?,
        })
    }
}

#[async_trait]
impl SessionReader for SessionGateway {
    async fn find(&self, session_id: &Id<Session>) -> AppResult<Option<Session>> {
        let session_id = session_id.value;
        self.session
            .with_tx(|tx| {
                async move {
                    sqlx::query(FIND_SESSION)
                        .bind(session_id)
                        .fetch_optional(tx.as_mut())
                        .await?
                        .as_ref()
                        .map(Self::get_session)
                        .transpose()
                }
                .boxed()
            })
            .await
    }
}
