use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::db::DBSession;

type PgTransaction = Transaction<'static, Postgres>;

struct UnitOfWork {
    pool: PgPool,
    tx: Option<PgTransaction>,
}

impl UnitOfWork {
    async fn transaction(&mut self) -> AppResult<&mut PgTransaction> {
        if self.tx.is_none() {
            debug!("Opening transaction");
            self.tx = Some(self.pool.begin().await?);
        }
        self.tx
            .as_mut()
            .ok_or(AppError::DatabaseError(sqlx::Error::PoolClosed))
    }
}

/// Unit of work shared by the gateways of one request. The transaction is
/// opened on first use and closed by `commit` or `rollback`; an uncommitted
/// transaction is rolled back when the last clone is dropped.
#[derive(Clone)]
pub struct SqlxSession {
    work: Arc<Mutex<UnitOfWork>>,
}

impl SqlxSession {
    pub fn new_lazy(pool: PgPool) -> Self {
        Self {
            work: Arc::new(Mutex::new(UnitOfWork { pool, tx: None })),
        }
    }

    async fn lock(&self) -> MutexGuard<'_, UnitOfWork> {
        self.work.lock().await
    }

    /// Runs `f` inside the request transaction, opening it if needed.
    pub async fn with_tx<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(&'a mut PgTransaction) -> BoxFuture<'a, AppResult<T>>,
    {
        let mut work = self.lock().await;
        let tx = work.transaction().await?;
        f(tx).await
    }

    pub async fn in_transaction(&self) -> bool {
        self.lock().await.tx.is_some()
    }
}

#[async_trait]
impl DBSession for SqlxSession {
    async fn commit(&self) -> AppResult<()> {
        match self.lock().await.tx.take() {
            Some(tx) => Ok(tx.commit().await?),
            None => Ok(()),
        }
    }

    async fn rollback(&self) -> AppResult<()> {
        match self.lock().await.tx.take() {
            Some(tx) => {
                debug!("Rolling back transaction");
                Ok(tx.rollback().await?)
            }
            None => Ok(()),
        }
    }
}
