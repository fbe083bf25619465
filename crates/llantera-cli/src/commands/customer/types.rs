//! Customer types
//!
//! Types for customer commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use llantera_core::Customer;

use crate::commands::listing::ListArgs;
use crate::output::or_dash;

#[derive(Subcommand)]
pub enum CustomerAction {
    /// List customers
    List(ListArgs),

    /// Show customer details
    Show {
        /// Customer ID
        id: i64,
    },

    /// Add a new customer
    Add(CustomerFields),

    /// Update an existing customer
    Update {
        /// Customer ID
        id: i64,

        #[command(flatten)]
        fields: CustomerPatch,
    },

    /// Delete a customer
    Delete {
        /// Customer ID
        id: i64,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Look up a person by DNI
    LookupDni {
        /// 8-digit national ID
        dni: String,

        /// Create the customer from the registry data
        #[arg(long)]
        save: bool,
    },

    /// Look up a company by RUC
    LookupRuc {
        /// 11-digit tax ID
        ruc: String,

        /// Create the customer from the registry data
        #[arg(long)]
        save: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CustomerFields {
    /// Full name
    #[arg(short, long)]
    pub name: String,

    /// National ID (8 digits)
    #[arg(long)]
    pub dni: Option<String>,

    /// Tax ID (11 digits)
    #[arg(long)]
    pub ruc: Option<String>,

    /// Registered business name
    #[arg(short, long)]
    pub business_name: Option<String>,

    /// Phone number
    #[arg(short, long)]
    pub phone: Option<String>,

    /// Email address
    #[arg(short, long)]
    pub email: Option<String>,
}

impl From<CustomerFields> for Customer {
    fn from(fields: CustomerFields) -> Self {
        Customer {
            id: None,
            name: fields.name,
            dni: fields.dni,
            ruc: fields.ruc,
            business_name: fields.business_name,
            phone_number: fields.phone,
            email: fields.email,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct CustomerPatch {
    /// New full name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New national ID
    #[arg(long)]
    pub dni: Option<String>,

    /// New tax ID
    #[arg(long)]
    pub ruc: Option<String>,

    /// New business name
    #[arg(short, long)]
    pub business_name: Option<String>,

    /// New phone number
    #[arg(short, long)]
    pub phone: Option<String>,

    /// New email address
    #[arg(short, long)]
    pub email: Option<String>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.dni.is_none()
            && self.ruc.is_none()
            && self.business_name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }

    /// Overlay the given fields on `customer`; empty strings clear optional fields
    pub fn apply(self, customer: &mut Customer) {
        fn optional(value: String) -> Option<String> {
            Some(value).filter(|v| !v.trim().is_empty())
        }

        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(dni) = self.dni {
            customer.dni = optional(dni);
        }
        if let Some(ruc) = self.ruc {
            customer.ruc = optional(ruc);
        }
        if let Some(business_name) = self.business_name {
            customer.business_name = optional(business_name);
        }
        if let Some(phone) = self.phone {
            customer.phone_number = optional(phone);
        }
        if let Some(email) = self.email {
            customer.email = optional(email);
        }
    }
}

/// Customer row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct CustomerRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "DNI")]
    pub dni: String,
    #[tabled(rename = "RUC")]
    pub ruc: String,
    #[tabled(rename = "Business name")]
    pub business_name: String,
    #[tabled(rename = "Phone")]
    pub phone: String,
    #[tabled(rename = "Email")]
    pub email: String,
}

impl From<Customer> for CustomerRow {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer
                .id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "new".to_string()),
            name: customer.name,
            dni: or_dash(customer.dni.as_deref()),
            ruc: or_dash(customer.ruc.as_deref()),
            business_name: or_dash(customer.business_name.as_deref()),
            phone: or_dash(customer.phone_number.as_deref()),
            email: or_dash(customer.email.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer {
            id: Some(4),
            name: "Rosa Huaman".to_string(),
            dni: Some("45678912".to_string()),
            ruc: None,
            business_name: None,
            phone_number: Some("987654321".to_string()),
            email: Some("rosa@correo.pe".to_string()),
        }
    }

    #[test]
    fn test_customer_row_from_customer() {
        let row = CustomerRow::from(customer());
        assert_eq!(row.id, "4");
        assert_eq!(row.dni, "45678912");
        assert_eq!(row.ruc, "-");

        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("Rosa Huaman"));
    }

    #[test]
    fn test_patch_overlays_and_clears() {
        let mut c = customer();
        let patch = CustomerPatch {
            name: Some("Rosa Huaman Diaz".to_string()),
            email: Some(String::new()),
            ..Default::default()
        };
        assert!(!patch.is_empty());

        patch.apply(&mut c);

        assert_eq!(c.name, "Rosa Huaman Diaz");
        assert_eq!(c.email, None);
        assert_eq!(c.phone_number.as_deref(), Some("987654321"));
    }

    #[test]
    fn test_empty_patch() {
        assert!(CustomerPatch::default().is_empty());
    }
}
