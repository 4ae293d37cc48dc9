//! User directory gateway.
//!
//! `Gateway` is the capability set every backend implements, so callers can
//! hold a `dyn Gateway` and swap the in-process [`mock::MockGateway`] for a
//! networked one without changing call sites.

pub mod mock;

use async_trait::async_trait;

use crate::core::error::GatewayResult;
use crate::models::protocol::{
    AuthRequest, CreateRequest, DeleteRequest, GetByLoginRequest, GetRequest, ListRequest,
    ListResponse, PatchRequest,
};
use crate::models::session::AuthResponse;
use crate::models::user::User;

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Page over the directory in insertion order
    async fn list(&self, req: ListRequest) -> GatewayResult<ListResponse>;

    async fn get(&self, req: GetRequest) -> GatewayResult<User>;

    async fn get_by_login(&self, req: GetByLoginRequest) -> GatewayResult<User>;

    /// Register a new user. Fails with `AlreadyExists` if the login is taken.
    async fn create(&self, req: CreateRequest) -> GatewayResult<User>;

    /// Overwrite the fields present on the request
    async fn patch(&self, req: PatchRequest) -> GatewayResult<User>;

    async fn delete(&self, req: DeleteRequest) -> GatewayResult<()>;

    /// Resolve a login and make it the current actor
    async fn authenticate(&self, req: AuthRequest) -> GatewayResult<AuthResponse>;

    /// The current actor, or `Unauthenticated`
    async fn me(&self) -> GatewayResult<User>;
}
