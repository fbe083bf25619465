//! Customer query commands
//!
//! Read operations for customers.

use anyhow::Result;

use crate::commands::listing::{load_page, print_page_footer, ListArgs};
use crate::commands::{report, Context};
use crate::output::{print_output, print_single};
use super::types::CustomerRow;

pub async fn list_customers(ctx: &Context, args: ListArgs) -> Result<()> {
    let page_size = args.page_size(ctx);
    let ctrl = ctx.customers(page_size);

    let snapshot = load_page(&ctrl, &args, page_size).await?;

    let rows: Vec<CustomerRow> = snapshot
        .items()
        .iter()
        .cloned()
        .map(CustomerRow::from)
        .collect();
    print_output(&rows, ctx.format)?;
    print_page_footer(ctx, &snapshot, "customers");

    Ok(())
}

pub async fn show_customer(ctx: &Context, id: i64) -> Result<()> {
    let ctrl = ctx.customers(ctx.config.page_size);
    let customer = ctrl.get(id).await.map_err(report)?;

    print_single(&CustomerRow::from(customer), ctx.format)?;

    Ok(())
}
