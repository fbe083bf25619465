//! Backend REST gateways
//!
//! ## Structure
//! - `client.rs` - ApiClient (bearer injection, error mapping)
//! - `auth.rs` - AuthApi, the AuthGateway over `/users/*`
//! - `resource.rs` - RestCollection, the CollectionGateway for customers and suppliers
//! - `registry.rs` - DNI/RUC registry lookups
//! - `export.rs` - Supplier spreadsheet download

use std::sync::Arc;

use crate::models::{Customer, Supplier};

pub mod auth;
pub mod client;
pub mod export;
pub mod registry;
pub mod resource;

pub use auth::AuthApi;
pub use client::ApiClient;
pub use export::{SupplierExport, DEFAULT_EXPORT_FILE};
pub use registry::RegistryApi;
pub use resource::{ResourceSpec, RestCollection, UpdateStyle, CUSTOMERS, SUPPLIERS};

/// Gateway set sharing one HTTP client
pub struct Backend {
    pub client: Arc<ApiClient>,
    pub auth: Arc<AuthApi>,
    pub customers: Arc<RestCollection<Customer>>,
    pub suppliers: Arc<RestCollection<Supplier>>,
    pub registry: RegistryApi,
    pub export: SupplierExport,
}

impl Backend {
    pub fn new(client: ApiClient) -> Self {
        let client = Arc::new(client);
        Self {
            auth: Arc::new(AuthApi::new(client.clone())),
            customers: Arc::new(RestCollection::customers(client.clone())),
            suppliers: Arc::new(RestCollection::suppliers(client.clone())),
            registry: RegistryApi::new(client.clone()),
            export: SupplierExport::new(client.clone()),
            client,
        }
    }
}
