//! Supplier spreadsheet export

use std::path::Path;
use std::sync::Arc;

use reqwest::Method;

use super::client::ApiClient;
use crate::error::Result;

/// File name the backend export is saved under by default
pub const DEFAULT_EXPORT_FILE: &str = "proveedores.xlsx";

pub struct SupplierExport {
    client: Arc<ApiClient>,
}

impl SupplierExport {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Raw spreadsheet bytes as produced by the backend
    pub async fn download(&self) -> Result<Vec<u8>> {
        let request = self.client.request(Method::GET, "/suppliers/export");
        let response = self
            .client
            .send(request, "Failed to export suppliers")
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Download and write to `path`, returning the number of bytes written
    pub async fn save_to(&self, path: &Path) -> Result<usize> {
        let bytes = self.download().await?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, &bytes).await?;
        log::info!("Exported suppliers to {}", path.display());
        Ok(bytes.len())
    }
}
