use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::{Password, User};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ListRequest {
    pub offset: i64,
    pub limit: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetRequest {
    pub id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetByLoginRequest {
    pub login: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateRequest {
    pub name: String,
    pub login: String,
    pub password: Password,
}

/// Partial update: absent fields are left untouched
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PatchRequest {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Password>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthRequest {
    pub login: String,
    pub password: Password,
}

/// One page of the directory, in insertion order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub offset: usize,
    /// Number of records in this page
    pub length: usize,
    pub records: Vec<User>,
    /// Size of the whole directory
    pub total_records: usize,
}

impl ListRequest {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    /// Offset and limit clamped to non-negative values
    pub fn window(&self) -> (usize, usize) {
        let offset = usize::try_from(self.offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit.max(0)).unwrap_or(usize::MAX);
        (offset, limit)
    }
}

impl CreateRequest {
    pub fn new(
        name: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<Password>,
    ) -> Self {
        Self {
            name: name.into(),
            login: login.into(),
            password: password.into(),
        }
    }
}

impl AuthRequest {
    pub fn new(login: impl Into<String>, password: impl Into<Password>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

impl PatchRequest {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    pub fn password(mut self, password: impl Into<Password>) -> Self {
        self.password = Some(password.into());
        self
    }
}
