//! Supplier query commands

use std::path::PathBuf;

use anyhow::Result;

use crate::commands::listing::{load_page, print_page_footer, ListArgs};
use crate::commands::{report, Context};
use crate::output::{print_output, print_single, print_success};
use super::types::SupplierRow;

pub async fn list_suppliers(ctx: &Context, args: ListArgs) -> Result<()> {
    let page_size = args.page_size(ctx);
    let ctrl = ctx.suppliers(page_size);

    let snapshot = load_page(&ctrl, &args, page_size).await?;

    let rows: Vec<SupplierRow> = snapshot
        .items()
        .iter()
        .cloned()
        .map(SupplierRow::from)
        .collect();
    print_output(&rows, ctx.format)?;
    print_page_footer(ctx, &snapshot, "suppliers");

    Ok(())
}

pub async fn show_supplier(ctx: &Context, id: i64) -> Result<()> {
    let ctrl = ctx.suppliers(ctx.config.page_size);
    let supplier = ctrl.get(id).await.map_err(report)?;

    print_single(&SupplierRow::from(supplier), ctx.format)?;

    Ok(())
}

pub async fn export_suppliers(ctx: &Context, output: PathBuf) -> Result<()> {
    let written = ctx
        .backend
        .export
        .save_to(&output)
        .await
        .map_err(report)?;

    print_success(
        &format!("Exported suppliers to {} ({} bytes)", output.display(), written),
        ctx.quiet,
    );

    Ok(())
}
