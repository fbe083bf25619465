//! Customer commands
//!
//! Commands for managing customers: list, show, add, update, delete and
//! registry lookups.

mod mutations;
mod queries;
mod types;

use anyhow::Result;

use crate::commands::Context;

// Re-export public types
pub use types::{CustomerAction, CustomerRow};

pub async fn execute(ctx: &Context, action: CustomerAction) -> Result<()> {
    ctx.require_session().await?;

    match action {
        CustomerAction::List(args) => queries::list_customers(ctx, args).await,
        CustomerAction::Show { id } => queries::show_customer(ctx, id).await,
        CustomerAction::Add(fields) => mutations::add_customer(ctx, fields).await,
        CustomerAction::Update { id, fields } => mutations::update_customer(ctx, id, fields).await,
        CustomerAction::Delete { id, force } => mutations::delete_customer(ctx, id, force).await,
        CustomerAction::LookupDni { dni, save } => mutations::lookup_dni(ctx, dni, save).await,
        CustomerAction::LookupRuc { ruc, save } => mutations::lookup_ruc(ctx, ruc, save).await,
    }
}
