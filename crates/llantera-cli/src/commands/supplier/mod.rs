//! Supplier commands
//!
//! Commands for managing suppliers: list, show, add, update, delete, RUC
//! lookup and spreadsheet export.

mod mutations;
mod queries;
mod types;

use anyhow::Result;

use crate::commands::Context;

pub use types::{SupplierAction, SupplierRow};

pub async fn execute(ctx: &Context, action: SupplierAction) -> Result<()> {
    ctx.require_session().await?;

    match action {
        SupplierAction::List(args) => queries::list_suppliers(ctx, args).await,
        SupplierAction::Show { id } => queries::show_supplier(ctx, id).await,
        SupplierAction::Add(fields) => mutations::add_supplier(ctx, fields).await,
        SupplierAction::Update { id, name, ruc, cellphone } => {
            mutations::update_supplier(ctx, id, name, ruc, cellphone).await
        }
        SupplierAction::Delete { id, force } => mutations::delete_supplier(ctx, id, force).await,
        SupplierAction::LookupRuc { ruc, save } => mutations::lookup_ruc(ctx, ruc, save).await,
        SupplierAction::Export { output } => queries::export_suppliers(ctx, output).await,
    }
}
