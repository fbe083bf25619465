//! Customer mutation commands
//!
//! Create, update and delete operations for customers, plus registry
//! lookups that can pre-fill a new customer.

use anyhow::{bail, Result};

use llantera_core::Customer;

use crate::commands::{report, Context};
use crate::output::{print_error, print_info, print_single, print_success};
use super::types::{CustomerFields, CustomerPatch, CustomerRow};

pub async fn add_customer(ctx: &Context, fields: CustomerFields) -> Result<()> {
    let ctrl = ctx.customers(ctx.config.page_size);
    let created = ctrl.create(&Customer::from(fields)).await.map_err(report)?;

    print_success(&format!("Created customer: {}", created.name), ctx.quiet);
    if !ctx.quiet {
        print_single(&CustomerRow::from(created), ctx.format)?;
    }

    Ok(())
}

pub async fn update_customer(ctx: &Context, id: i64, patch: CustomerPatch) -> Result<()> {
    if patch.is_empty() {
        print_info("Nothing to update", ctx.quiet);
        return Ok(());
    }

    let ctrl = ctx.customers(ctx.config.page_size);
    let mut customer = ctrl.get(id).await.map_err(report)?;
    patch.apply(&mut customer);

    let updated = ctrl.update(id, &customer).await.map_err(report)?;

    print_success(&format!("Updated customer: {}", updated.name), ctx.quiet);
    if !ctx.quiet {
        print_single(&CustomerRow::from(updated), ctx.format)?;
    }

    Ok(())
}

pub async fn delete_customer(ctx: &Context, id: i64, force: bool) -> Result<()> {
    let ctrl = ctx.customers(ctx.config.page_size);

    if !force {
        let customer = ctrl.get(id).await.map_err(report)?;
        print_single(&CustomerRow::from(customer), ctx.format)?;
        print_error("Use --force to confirm deletion");
        return Ok(());
    }

    ctrl.remove(id).await.map_err(report)?;
    print_success(&format!("Deleted customer: {}", id), ctx.quiet);

    Ok(())
}

pub async fn lookup_dni(ctx: &Context, dni: String, save: bool) -> Result<()> {
    let draft = ctx
        .backend
        .registry
        .customer_by_dni(&dni)
        .await
        .map_err(report)?;
    show_or_save(ctx, draft, save).await
}

pub async fn lookup_ruc(ctx: &Context, ruc: String, save: bool) -> Result<()> {
    let draft = ctx
        .backend
        .registry
        .customer_by_ruc(&ruc)
        .await
        .map_err(report)?;
    show_or_save(ctx, draft, save).await
}

async fn show_or_save(ctx: &Context, draft: Customer, save: bool) -> Result<()> {
    if draft.name.trim().is_empty() {
        bail!("The registry returned no name for this document");
    }

    if !save {
        print_single(&CustomerRow::from(draft), ctx.format)?;
        print_info("Use --save to create this customer", ctx.quiet);
        return Ok(());
    }

    let ctrl = ctx.customers(ctx.config.page_size);
    let created = ctrl.create(&draft).await.map_err(report)?;
    print_success(&format!("Created customer: {}", created.name), ctx.quiet);
    if !ctx.quiet {
        print_single(&CustomerRow::from(created), ctx.format)?;
    }

    Ok(())
}
