use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::time::{expires_at, is_expired};

/// Session token handed out by a successful authentication
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Token identifier
    pub id: Uuid,
    /// Id of the authenticated user
    pub user: Uuid,
    pub expires: DateTime<Utc>,
}

impl AuthResponse {
    pub fn issue(user: Uuid, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            expires: expires_at(issued_at, ttl),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.expires, now)
    }
}
