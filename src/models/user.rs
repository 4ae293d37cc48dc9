use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Access level attached to every user record
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Admin,
    #[default]
    User,
    Unlogged,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Admin => "admin",
            Level::User => "user",
            Level::Unlogged => "unlogged",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User record as stored in the directory and returned to callers.
/// Carries no password.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier, minted at creation
    #[serde(alias = "uuid")]
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Unique handle used for lookup and authentication
    pub login: String,
    /// Access level, `user` for every record created through the gateway
    #[serde(default)]
    pub level: Level,
}

impl User {
    pub fn new(name: String, login: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            login,
            level: Level::User,
        }
    }
}

/// Write-only secret accepted on create, patch and authenticate requests.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Password {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for Password {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}
