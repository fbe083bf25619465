//! # llantera-core
//!
//! Core client logic for Llantera - shared by every front end.
//!
//! This crate provides:
//! - Session gating and renewal (`auth` module)
//! - Paginated remote collections (`collection` module)
//! - Backend REST gateways (`api` module)
//! - Data models (`models` module)
//! - Form validation (`validation` module)
//! - Configuration (`config` module)
//! - Unified error handling (`error` module)

pub mod api;
pub mod auth;
pub mod collection;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-exports for convenience
pub use config::ClientConfig;
pub use error::{Error, FieldError, Result};

pub use api::{ApiClient, AuthApi, Backend, RegistryApi, RestCollection, SupplierExport};
pub use auth::{
    AuthGateway, FileTokenStore, GuardCheck, MemoryTokenStore, RouteDecision, Router, Session,
    SessionGuard, SessionStatus, TokenStore,
};
pub use collection::{
    CollectionController, CollectionGateway, CollectionSnapshot, FetchOutcome, RequestState,
};
pub use models::{
    Customer, DniRecord, Entity, EntityId, NewAccount, PageQuery, PageResponse, RucRecord,
    Supplier, UserIdentity,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_version_format() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "Version should be in x.y.z format");
    }
}
