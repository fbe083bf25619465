//! Session guard
//!
//! Decides whether a protected view may render, must wait for verification,
//! or should send the user to the login entry point.
//!
//! ```text
//! Unchecked ──initialize──▶ Checking ──▶ Valid ──renew──▶ Checking ──▶ …
//!                              │                                   │
//!                              └──────────▶ Invalid ◀──────────────┘
//!                                   ▲  │ login / register
//!                        logout ────┘  └──▶ Checking
//! ```
//!
//! Verification failures never escape as errors: they become `Invalid` plus
//! `last_error`. Only `logout` and `enter_protected` navigate; the background
//! renew changes state silently.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{oneshot, RwLock};
use tokio::time::interval;

use super::claims::{peek_claims, TokenClaims};
use super::ports::{AuthGateway, Router};
use super::session::{GuardCheck, RouteDecision, Session, SessionStatus};
use super::token_store::TokenStore;
use crate::config::DEFAULT_RENEW_SECS;
use crate::error::{Error, Result};
use crate::models::{NewAccount, UserIdentity};

/// Client-side session guard
pub struct SessionGuard {
    inner: Arc<GuardInner>,
    renew_interval: Duration,
    /// Shutdown signal for the renew task; dropping it stops the task
    renew_shutdown: Mutex<Option<oneshot::Sender<()>>>,
}

struct GuardInner {
    store: Arc<dyn TokenStore>,
    auth: Arc<dyn AuthGateway>,
    router: Arc<dyn Router>,
    session: RwLock<Session>,
}

impl SessionGuard {
    pub fn new(
        store: Arc<dyn TokenStore>,
        auth: Arc<dyn AuthGateway>,
        router: Arc<dyn Router>,
    ) -> Self {
        Self {
            inner: Arc::new(GuardInner {
                store,
                auth,
                router,
                session: RwLock::new(Session::new()),
            }),
            renew_interval: Duration::from_secs(DEFAULT_RENEW_SECS),
            renew_shutdown: Mutex::new(None),
        }
    }

    pub fn with_renew_interval(mut self, renew_interval: Duration) -> Self {
        self.renew_interval = renew_interval;
        self
    }

    /// Copy of the current session
    pub async fn session(&self) -> Session {
        self.inner.session.read().await.clone()
    }

    pub async fn status(&self) -> SessionStatus {
        self.inner.session.read().await.status
    }

    pub async fn current_user(&self) -> Option<UserIdentity> {
        self.inner.session.read().await.user.clone()
    }

    /// Startup verification of a persisted token.
    ///
    /// Only the first call does any work; later calls return the status
    /// reached so far.
    pub async fn initialize(&self) -> SessionStatus {
        let generation = {
            let mut session = self.inner.session.write().await;
            if session.status != SessionStatus::Unchecked {
                return session.status;
            }

            match self.inner.store.read() {
                Some(token) => session.begin_check(token),
                None => {
                    log::info!("No stored token, session is invalid");
                    session.invalidate(None);
                    return session.status;
                }
            }
        };

        log::debug!("Verifying stored session token");
        let result = self.inner.auth.verify_current_user().await;
        // Absorbed: the outcome is in the session state
        let _ = self.inner.complete_check(generation, result).await;
        self.status().await
    }

    /// Exchange credentials, persist the token and verify it.
    ///
    /// On exchange failure the session is left as it was and nothing is
    /// persisted.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserIdentity> {
        match self.inner.auth.exchange_credentials(username, password).await {
            Ok(token) => {
                log::info!("Credential exchange succeeded for {}", username);
                self.establish(token).await
            }
            Err(e) => {
                log::warn!("Login failed for {}: {}", username, e);
                self.inner.session.write().await.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Create an account and start a session with its token
    pub async fn register(&self, account: &NewAccount) -> Result<UserIdentity> {
        match self.inner.auth.register(account).await {
            Ok(token) => {
                log::info!("Registered account {}", account.username);
                self.establish(token).await
            }
            Err(e) => {
                log::warn!("Registration failed for {}: {}", account.username, e);
                self.inner.session.write().await.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    async fn establish(&self, token: String) -> Result<UserIdentity> {
        self.inner.store.save(&token)?;
        let generation = self.inner.session.write().await.begin_check(token);

        let result = self.inner.auth.verify_current_user().await;
        self.inner.complete_check(generation, result).await
    }

    /// End the session locally and navigate to the login entry point
    pub async fn logout(&self) {
        if let Err(e) = self.inner.store.clear() {
            log::warn!("Could not clear stored token: {}", e);
        }
        self.inner.session.write().await.invalidate(None);
        log::info!("Logged out");
        self.inner.router.redirect_to_login();
    }

    /// Silent re-verification; never navigates
    pub async fn renew_check(&self) -> SessionStatus {
        self.inner.renew().await
    }

    /// On-demand check before a sensitive action; never navigates
    pub async fn guard_check(&self) -> GuardCheck {
        let token = match self.inner.store.read() {
            Some(token) => token,
            None => {
                let mut session = self.inner.session.write().await;
                if session.status != SessionStatus::Invalid {
                    session.invalidate(None);
                }
                return GuardCheck::redirect();
            }
        };

        match self.inner.auth.verify_current_user().await {
            Ok(user) => {
                let mut session = self.inner.session.write().await;
                if session.status != SessionStatus::Checking {
                    session.begin_check(token.clone());
                    session.validate(token, user);
                }
                GuardCheck::valid()
            }
            Err(e) => {
                log::warn!("Session check failed: {}", e);
                self.inner.drop_session(Some(e.user_message())).await;
                GuardCheck::redirect()
            }
        }
    }

    /// What a protected view should do, without side effects
    pub async fn route_decision(&self) -> RouteDecision {
        self.status().await.into()
    }

    /// Entry into a protected view: redirects when the session is invalid
    pub async fn enter_protected(&self) -> RouteDecision {
        let decision = self.route_decision().await;
        if decision == RouteDecision::Redirect {
            self.inner.router.redirect_to_login();
        }
        decision
    }

    /// Unverified claims of the stored token, for display
    pub fn token_claims(&self) -> Option<TokenClaims> {
        self.inner.store.read().and_then(|token| peek_claims(&token))
    }

    /// Start the periodic renew task. A no-op when already running.
    pub fn start_renewal(&self) {
        let Ok(mut slot) = self.renew_shutdown.lock() else {
            return;
        };
        if slot.is_some() {
            log::debug!("Session renewal is already running");
            return;
        }

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        *slot = Some(shutdown_tx);

        let inner = Arc::clone(&self.inner);
        let period = self.renew_interval;
        log::info!("Starting session renewal every {}s", period.as_secs());

        tokio::spawn(async move {
            let mut timer = interval(period);
            // First tick is immediate
            timer.tick().await;

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        if inner.store.has_token() {
                            inner.renew().await;
                        }
                    }
                    _ = &mut shutdown_rx => break,
                }
            }
            log::debug!("Session renewal stopped");
        });
    }

    /// Stop the renew task
    pub fn shutdown(&self) {
        let tx = match self.renew_shutdown.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        if let Some(tx) = tx {
            let _ = tx.send(());
        }
    }

    pub fn is_renewing(&self) -> bool {
        self.renew_shutdown
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl GuardInner {
    /// Apply the result of check `generation`.
    ///
    /// A result is discarded when the session left `Checking` (logout during
    /// verification) or a newer check started meanwhile (login during renew).
    async fn complete_check(
        &self,
        generation: u64,
        result: Result<UserIdentity>,
    ) -> Result<UserIdentity> {
        let mut session = self.session.write().await;
        if !session.is_current_check(generation) {
            log::debug!(
                "Discarding result of check {}, session is {} at check {}",
                generation,
                session.status,
                session.check_generation
            );
            return Err(Error::unauthorized("Session changed during verification"));
        }

        match result {
            Ok(user) => {
                let token = match session.token.clone().or_else(|| self.store.read()) {
                    Some(token) => token,
                    None => {
                        session.invalidate(None);
                        return Err(Error::unauthorized("Token removed during verification"));
                    }
                };
                log::info!("Session valid for {}", user.username);
                session.validate(token, user.clone());
                Ok(user)
            }
            Err(e) => {
                log::warn!("Session verification failed: {}", e);
                if let Err(clear_err) = self.store.clear() {
                    log::warn!("Could not clear stored token: {}", clear_err);
                }
                session.invalidate(Some(e.user_message()));
                Err(e)
            }
        }
    }

    async fn drop_session(&self, error: Option<String>) {
        if let Err(e) = self.store.clear() {
            log::warn!("Could not clear stored token: {}", e);
        }
        self.session.write().await.invalidate(error);
    }

    async fn renew(&self) -> SessionStatus {
        let generation = {
            let mut session = self.session.write().await;
            // Only an established session is renewed
            if session.status != SessionStatus::Valid {
                return session.status;
            }
            match self.store.read() {
                Some(token) => session.begin_check(token),
                None => {
                    session.invalidate(Some("Stored token was removed".to_string()));
                    return session.status;
                }
            }
        };

        log::debug!("Renewing session");
        let result = self.auth.verify_current_user().await;
        let _ = self.complete_check(generation, result).await;
        self.session.read().await.status
    }
}
