//! CLI commands module
//!
//! Contains all CLI command implementations.

pub mod auth;
pub mod config;
pub mod customer;
pub mod dashboard;
pub mod listing;
pub mod supplier;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use llantera_core::api::{ApiClient, Backend, RestCollection};
use llantera_core::auth::{FileTokenStore, RouteDecision, Router, SessionGuard};
use llantera_core::collection::CollectionController;
use llantera_core::validation::{validate_customer, validate_supplier};
use llantera_core::{ClientConfig, Customer, Supplier, UserIdentity};

use crate::output::{print_error, print_field_errors, print_warning, OutputFormat};

/// Shared context for all commands
pub struct Context {
    pub config: ClientConfig,
    pub backend: Backend,
    pub guard: SessionGuard,
    pub token_path: PathBuf,
    pub format: OutputFormat,
    pub quiet: bool,
}

/// Login "navigation" for a terminal: tell the operator how to sign in
pub struct CliRouter {
    quiet: bool,
}

impl Router for CliRouter {
    fn redirect_to_login(&self) {
        print_warning("Sign in with `llantera auth login` to continue.", self.quiet);
    }
}

impl Context {
    pub fn new(config: ClientConfig, format: OutputFormat, quiet: bool) -> Result<Self> {
        let store = Arc::new(FileTokenStore::from_config()?);
        let token_path = store.path().to_path_buf();
        log::debug!(
            "Backend {} with token file {}",
            config.api_url,
            token_path.display()
        );

        let backend = Backend::new(ApiClient::new(&config, store.clone())?);
        let guard = SessionGuard::new(store, backend.auth.clone(), Arc::new(CliRouter { quiet }))
            .with_renew_interval(config.renew_interval());

        Ok(Self {
            config,
            backend,
            guard,
            token_path,
            format,
            quiet,
        })
    }

    /// Gate for protected commands: verify the stored session or stop
    pub async fn require_session(&self) -> Result<UserIdentity> {
        self.guard.initialize().await;

        match self.guard.enter_protected().await {
            RouteDecision::Render => {
                self.guard.start_renewal();
                self.guard
                    .current_user()
                    .await
                    .ok_or_else(|| anyhow!("Session has no user"))
            }
            decision => {
                let session = self.guard.session().await;
                Err(anyhow!(refusal_message(decision, session.last_error)))
            }
        }
    }

    pub fn customers(&self, page_size: u32) -> CollectionController<RestCollection<Customer>> {
        CollectionController::new(self.backend.customers.clone(), page_size)
            .with_debounce(self.config.debounce())
            .with_validator(validate_customer)
    }

    pub fn suppliers(&self, page_size: u32) -> CollectionController<RestCollection<Supplier>> {
        CollectionController::new(self.backend.suppliers.clone(), page_size)
            .with_debounce(self.config.debounce())
            .with_validator(validate_supplier)
    }
}

/// Turn a core error into a CLI error, listing invalid fields first
pub fn report(err: llantera_core::Error) -> anyhow::Error {
    if !err.field_errors().is_empty() {
        print_error("Please fix the following fields:");
        print_field_errors(err.field_errors());
        return anyhow!("Validation failed");
    }
    anyhow!(err.user_message())
}

/// Why a protected command may not run
fn refusal_message(decision: RouteDecision, last_error: Option<String>) -> String {
    match decision {
        RouteDecision::Wait => {
            "Session verification is still in progress, try again in a moment".to_string()
        }
        _ => last_error.unwrap_or_else(|| "Session is not valid".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refusal_while_verifying() {
        let message = refusal_message(RouteDecision::Wait, Some("Token expired".to_string()));
        assert!(message.contains("still in progress"));
    }

    #[test]
    fn test_refusal_after_invalid_session() {
        assert_eq!(
            refusal_message(RouteDecision::Redirect, Some("Token expired".to_string())),
            "Token expired"
        );
        assert_eq!(
            refusal_message(RouteDecision::Redirect, None),
            "Session is not valid"
        );
    }
}
