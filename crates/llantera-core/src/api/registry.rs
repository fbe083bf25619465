//! National registry lookups (DNI / RUC)
//!
//! Identifiers are checked locally first; malformed ones never reach the
//! backend.

use std::sync::Arc;

use reqwest::Method;

use super::client::ApiClient;
use crate::error::Result;
use crate::models::{Customer, DniRecord, RucRecord};
use crate::validation::{validate_dni, validate_ruc};

pub struct RegistryApi {
    client: Arc<ApiClient>,
}

impl RegistryApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Customer draft pre-filled from a DNI
    pub async fn customer_by_dni(&self, dni: &str) -> Result<Customer> {
        let dni = dni.trim();
        validate_dni(dni)?;
        let request = self
            .client
            .request(Method::GET, &format!("/customers/search-dni/{}", dni));
        let record: DniRecord = self.client.send_json(request, "DNI not found").await?;
        Ok(record.into_customer(dni))
    }

    /// Customer draft pre-filled from a RUC
    pub async fn customer_by_ruc(&self, ruc: &str) -> Result<Customer> {
        let ruc = ruc.trim();
        validate_ruc(ruc)?;
        let request = self
            .client
            .request(Method::GET, &format!("/customers/search-ruc/{}", ruc));
        let record: RucRecord = self.client.send_json(request, "RUC not found").await?;
        Ok(record.into_customer(ruc))
    }

    /// Registry record for a supplier RUC
    pub async fn supplier_by_ruc(&self, ruc: &str) -> Result<RucRecord> {
        let ruc = ruc.trim();
        validate_ruc(ruc)?;
        let request = self
            .client
            .request(Method::GET, &format!("/suppliers/ruc/{}", ruc));
        self.client.send_json(request, "RUC not found").await
    }
}
