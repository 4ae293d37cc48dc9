use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration as StdDuration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::config::{Config, SessionConfig, StorageBackend};
use crate::core::error::{GatewayError, GatewayResult};
use crate::gateway::Gateway;
use crate::models::protocol::{
    AuthRequest, CreateRequest, DeleteRequest, GetByLoginRequest, GetRequest, ListRequest,
    ListResponse, PatchRequest,
};
use crate::models::session::AuthResponse;
use crate::models::user::User;
use crate::stores::directory::UserDirectory;
use crate::stores::snapshot::{Snapshot, SnapshotStore};
use crate::stores::storage::{FileStorage, MemoryStorage, Storage};
use crate::utils::time;
use crate::validation::user::{validate_create, validate_patch};

/// Tunables for a mock gateway instance
#[derive(Clone, Debug)]
pub struct GatewayOptions {
    /// Lifetime of issued session tokens
    pub token_ttl: chrono::Duration,
    /// Simulated delay before every operation. Zero only yields to the scheduler.
    pub latency: StdDuration,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            token_ttl: chrono::Duration::zero(),
            latency: StdDuration::ZERO,
        }
    }
}

impl From<&SessionConfig> for GatewayOptions {
    fn from(config: &SessionConfig) -> Self {
        Self {
            token_ttl: config.token_ttl(),
            latency: config.latency(),
        }
    }
}

struct State {
    directory: UserDirectory,
    /// Id of the last authenticated user
    actor: Option<Uuid>,
}

/// In-process `Gateway` backed by an ordered user sequence.
///
/// Every mutation is committed to the snapshot store before it becomes
/// visible, so a failed commit leaves the instance unchanged.
pub struct MockGateway<S = Snapshot<MemoryStorage>> {
    state: RwLock<State>,
    snapshot: S,
    options: GatewayOptions,
}

/// Gateway built from a `Config`, with the storage backend chosen at runtime
pub type ConfiguredGateway = MockGateway<Snapshot<Box<dyn Storage>>>;

impl MockGateway {
    /// Empty gateway over private in-memory storage
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::in_memory(), GatewayOptions::default())
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfiguredGateway {
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate().context("Invalid gateway configuration")?;

        let storage: Box<dyn Storage> = match config.storage.backend {
            StorageBackend::Memory => Box::new(MemoryStorage::new()),
            StorageBackend::File => {
                let path = config
                    .storage
                    .path
                    .clone()
                    .context("storage path must be specified for the file backend")?;
                Box::new(FileStorage::new(path).context("Failed to open file storage")?)
            }
        };

        let snapshot = Snapshot::with_key(storage, config.storage.key.clone());
        Ok(Self::with_snapshot(snapshot, GatewayOptions::from(&config.session)))
    }
}

impl<S: SnapshotStore> MockGateway<S> {
    /// Hydrate a gateway from the last committed snapshot
    pub fn with_snapshot(snapshot: S, options: GatewayOptions) -> Self {
        let users = snapshot.load();

        info!(
            users = users.len(),
            token_ttl_secs = options.token_ttl.num_seconds(),
            latency_ms = u64::try_from(options.latency.as_millis()).unwrap_or(u64::MAX),
            "User directory hydrated"
        );

        Self {
            state: RwLock::new(State {
                directory: UserDirectory::from_users(users),
                actor: None,
            }),
            snapshot,
            options,
        }
    }

    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }

    pub fn options(&self) -> &GatewayOptions {
        &self.options
    }

    async fn settle(&self) {
        if self.options.latency.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.options.latency).await;
        }
    }

    fn commit(&self, next: &UserDirectory) -> Result<()> {
        self.snapshot.save(next.users())
    }
}

#[async_trait]
impl<S: SnapshotStore> Gateway for MockGateway<S> {
    async fn list(&self, req: ListRequest) -> GatewayResult<ListResponse> {
        self.settle().await;

        let (offset, limit) = req.window();
        let state = self.state.read().await;
        let records = state.directory.window(offset, limit).to_vec();

        Ok(ListResponse {
            offset,
            length: records.len(),
            records,
            total_records: state.directory.len(),
        })
    }

    async fn get(&self, req: GetRequest) -> GatewayResult<User> {
        self.settle().await;

        let state = self.state.read().await;
        state
            .directory
            .get(req.id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(req.id.to_string()))
    }

    async fn get_by_login(&self, req: GetByLoginRequest) -> GatewayResult<User> {
        self.settle().await;

        let state = self.state.read().await;
        state
            .directory
            .get_by_login(&req.login)
            .cloned()
            .ok_or(GatewayError::NotFound(req.login))
    }

    async fn create(&self, req: CreateRequest) -> GatewayResult<User> {
        self.settle().await;
        validate_create(&req)?;

        let mut state = self.state.write().await;
        if state.directory.login_taken(&req.login, None) {
            return Err(GatewayError::AlreadyExists { login: req.login });
        }

        // The password is accepted and discarded
        let user = User::new(req.name, req.login);
        let mut next = state.directory.clone();
        next.push(user.clone());

        self.commit(&next)?;
        state.directory = next;

        info!(user_id = %user.id, login = %user.login, "User created");
        Ok(user)
    }

    async fn patch(&self, req: PatchRequest) -> GatewayResult<User> {
        self.settle().await;
        validate_patch(&req)?;

        let mut state = self.state.write().await;
        if state.directory.get(req.id).is_none() {
            return Err(GatewayError::NotFound(req.id.to_string()));
        }

        if let Some(login) = &req.login {
            if state.directory.login_taken(login, Some(req.id)) {
                return Err(GatewayError::AlreadyExists { login: login.clone() });
            }
        }

        let mut next = state.directory.clone();
        let user = next
            .get_mut(req.id)
            .ok_or_else(|| GatewayError::NotFound(req.id.to_string()))?;

        if let Some(name) = req.name {
            user.name = name;
        }
        if let Some(login) = req.login {
            user.login = login;
        }
        let user = user.clone();

        self.commit(&next)?;
        state.directory = next;

        info!(
            user_id = %user.id,
            password_changed = req.password.is_some(),
            "User patched"
        );
        Ok(user)
    }

    async fn delete(&self, req: DeleteRequest) -> GatewayResult<()> {
        self.settle().await;

        let mut state = self.state.write().await;
        let mut next = state.directory.clone();
        let removed = next
            .remove(req.id)
            .ok_or_else(|| GatewayError::NotFound(req.id.to_string()))?;

        self.commit(&next)?;
        state.directory = next;

        if state.actor == Some(removed.id) {
            state.actor = None;
            debug!(user_id = %removed.id, "Current actor deleted, session cleared");
        }

        info!(user_id = %removed.id, login = %removed.login, "User deleted");
        Ok(())
    }

    async fn authenticate(&self, req: AuthRequest) -> GatewayResult<AuthResponse> {
        self.settle().await;

        let mut state = self.state.write().await;
        let user_id = state
            .directory
            .get_by_login(&req.login)
            .map(|user| user.id)
            .ok_or_else(|| GatewayError::NotFound(req.login.clone()))?;

        // No password check in the mock: resolving the login is enough
        let token = AuthResponse::issue(user_id, time::now(), self.options.token_ttl);
        state.actor = Some(user_id);

        info!(
            user_id = %user_id,
            token_id = %token.id,
            expires = %token.expires,
            "User authenticated"
        );
        Ok(token)
    }

    async fn me(&self) -> GatewayResult<User> {
        self.settle().await;

        let state = self.state.read().await;
        state
            .actor
            .and_then(|id| state.directory.get(id))
            .cloned()
            .ok_or(GatewayError::Unauthenticated)
    }
}
