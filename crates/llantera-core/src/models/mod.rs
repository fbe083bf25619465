//! Data models
//!
//! Records exchanged with the backend. Field names follow the backend's
//! camelCase JSON.

use serde::{Deserialize, Serialize};

/// Backend identifier for customers and suppliers
pub type EntityId = i64;

/// A record managed by a remote collection
pub trait Entity: Clone + Send + Sync + 'static {
    /// Server-assigned id, absent for drafts that were never saved
    fn id(&self) -> Option<EntityId>;

    /// Human-readable label used in log lines and confirmations
    fn label(&self) -> String;
}

// ============================================================================
// Customers & Suppliers
// ============================================================================

/// Customer record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dni: Option<String>,
    #[serde(default)]
    pub ruc: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Entity for Customer {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn label(&self) -> String {
        match &self.business_name {
            Some(business) if !business.is_empty() => format!("{} ({})", self.name, business),
            _ => self.name.clone(),
        }
    }
}

/// Supplier record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ruc: String,
    #[serde(default)]
    pub cellphone: Option<String>,
}

impl Entity for Supplier {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn label(&self) -> String {
        format!("{} [{}]", self.name, self.ruc)
    }
}

// ============================================================================
// Users
// ============================================================================

/// Identity returned by `/users/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserIdentity {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}

/// Self-registration payload for `/users/signup`
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Token envelope returned by signin/signup
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}

// ============================================================================
// Registry lookups
// ============================================================================

/// National ID (DNI) registry record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DniRecord {
    #[serde(default)]
    pub dni: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// Tax ID (RUC) registry record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RucRecord {
    #[serde(default)]
    pub ruc: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl DniRecord {
    /// Pre-fill a customer draft from the registry
    pub fn into_customer(self, dni: &str) -> Customer {
        Customer {
            name: self.name,
            dni: Some(self.dni.unwrap_or_else(|| dni.to_string())),
            ..Default::default()
        }
    }
}

impl RucRecord {
    /// Pre-fill a customer draft from the registry
    pub fn into_customer(self, ruc: &str) -> Customer {
        Customer {
            name: self.name,
            ruc: Some(self.ruc.unwrap_or_else(|| ruc.to_string())),
            business_name: self.business_name,
            ..Default::default()
        }
    }

    /// Apply the registry name to a supplier draft, keeping it when empty
    pub fn apply_to_supplier(&self, supplier: &mut Supplier) {
        if !self.name.is_empty() {
            supplier.name = self.name.clone();
        }
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// List request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub search_term: String,
    pub page_index: u32,
    pub page_size: u32,
}

impl PageQuery {
    pub fn new(search_term: impl Into<String>, page_index: u32, page_size: u32) -> Self {
        Self {
            search_term: search_term.into(),
            page_index,
            page_size,
        }
    }
}

/// One page of a remote collection, decoded from the backend page envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    #[serde(rename = "content", default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(rename = "number", default)]
    pub page_index: u32,
    #[serde(rename = "size", default)]
    pub page_size: u32,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
    #[serde(rename = "totalElements", default)]
    pub total_elements: u64,
}
