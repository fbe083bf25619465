//! Supplier types

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use llantera_core::api::DEFAULT_EXPORT_FILE;
use llantera_core::{RucRecord, Supplier};

use crate::commands::listing::ListArgs;
use crate::output::or_dash;

#[derive(Subcommand)]
pub enum SupplierAction {
    /// List suppliers
    List(ListArgs),

    /// Show supplier details
    Show {
        /// Supplier ID
        id: i64,
    },

    /// Add a new supplier
    Add(SupplierFields),

    /// Update an existing supplier
    Update {
        /// Supplier ID
        id: i64,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New tax ID
        #[arg(short, long)]
        ruc: Option<String>,

        /// New cellphone (empty to clear)
        #[arg(short, long)]
        cellphone: Option<String>,
    },

    /// Delete a supplier
    Delete {
        /// Supplier ID
        id: i64,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Look up a company by RUC
    LookupRuc {
        /// 11-digit tax ID
        ruc: String,

        /// Create the supplier from the registry data
        #[arg(long)]
        save: bool,
    },

    /// Download the supplier spreadsheet
    Export {
        /// Output file
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SupplierFields {
    /// Supplier name
    #[arg(short, long)]
    pub name: String,

    /// Tax ID (11 digits)
    #[arg(short, long)]
    pub ruc: String,

    /// Cellphone
    #[arg(short, long)]
    pub cellphone: Option<String>,
}

impl From<SupplierFields> for Supplier {
    fn from(fields: SupplierFields) -> Self {
        Supplier {
            id: None,
            name: fields.name,
            ruc: fields.ruc,
            cellphone: fields.cellphone.filter(|c| !c.trim().is_empty()),
        }
    }
}

/// Supplier row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct SupplierRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "RUC")]
    pub ruc: String,
    #[tabled(rename = "Cellphone")]
    pub cellphone: String,
}

impl From<Supplier> for SupplierRow {
    fn from(supplier: Supplier) -> Self {
        Self {
            id: supplier
                .id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "new".to_string()),
            name: supplier.name,
            ruc: supplier.ruc,
            cellphone: or_dash(supplier.cellphone.as_deref()),
        }
    }
}

/// Registry record row
#[derive(Debug, Serialize, Tabled)]
pub struct RucRow {
    #[tabled(rename = "RUC")]
    pub ruc: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Business name")]
    pub business_name: String,
    #[tabled(rename = "Address")]
    pub address: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl RucRow {
    pub fn new(ruc: &str, record: &RucRecord) -> Self {
        Self {
            ruc: record.ruc.clone().unwrap_or_else(|| ruc.to_string()),
            name: record.name.clone(),
            business_name: or_dash(record.business_name.as_deref()),
            address: or_dash(record.address.as_deref()),
            status: or_dash(record.status.as_deref()),
        }
    }
}
