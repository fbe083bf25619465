//! Collaborators the session guard depends on

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewAccount, UserIdentity};

/// Backend authentication endpoints
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Resolve the identity behind the stored token.
    ///
    /// Fails with `Unauthorized` when the token is invalid or expired.
    async fn verify_current_user(&self) -> Result<UserIdentity>;

    /// Exchange credentials for a bearer token.
    ///
    /// Fails with `InvalidCredentials` when the backend refuses them.
    async fn exchange_credentials(&self, username: &str, password: &str) -> Result<String>;

    /// Create an account and return its bearer token
    async fn register(&self, account: &NewAccount) -> Result<String>;
}

/// Navigation to the login entry point
pub trait Router: Send + Sync {
    fn redirect_to_login(&self);
}

/// Router that only logs, for headless use
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRouter;

impl Router for NoopRouter {
    fn redirect_to_login(&self) {
        log::debug!("Redirect to login requested");
    }
}
