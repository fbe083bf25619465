//! Dashboard command
//!
//! Signed-in user plus customer and supplier totals.

use anyhow::{bail, Result};
use serde::Serialize;
use tabled::Tabled;

use llantera_core::collection::FetchOutcome;

use super::Context;
use crate::output::print_single;

/// Dashboard row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct DashboardRow {
    #[tabled(rename = "User")]
    pub user: String,
    #[tabled(rename = "Roles")]
    pub roles: String,
    #[tabled(rename = "Customers")]
    pub customers: u64,
    #[tabled(rename = "Suppliers")]
    pub suppliers: u64,
}

pub async fn execute(ctx: &Context) -> Result<()> {
    let user = ctx.require_session().await?;

    // Totals come with any page; ask for the smallest one
    let customers = ctx.customers(1);
    let suppliers = ctx.suppliers(1);
    let (customer_outcome, supplier_outcome) =
        tokio::join!(customers.fetch("", 0, 1), suppliers.fetch("", 0, 1));

    for outcome in [customer_outcome, supplier_outcome] {
        if let FetchOutcome::Failed(message) = outcome {
            bail!(message);
        }
    }

    let row = DashboardRow {
        user: user.username.clone(),
        roles: if user.roles.is_empty() {
            "-".to_string()
        } else {
            user.roles.join(", ")
        },
        customers: customers.snapshot().await.page.total_elements,
        suppliers: suppliers.snapshot().await.page.total_elements,
    };
    print_single(&row, ctx.format)?;

    Ok(())
}
