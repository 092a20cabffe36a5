use crate::domain::entities::{id::Id, profile::Profile};
use chrono::{DateTime, Utc};

/// Session issued by the auth service. Read-only here.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Id<Session>,
    pub user_id: Id<Profile>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
