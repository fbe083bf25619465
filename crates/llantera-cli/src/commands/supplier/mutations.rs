//! Supplier mutation commands

use anyhow::Result;

use llantera_core::Supplier;

use crate::commands::{report, Context};
use crate::output::{print_error, print_info, print_single, print_success};
use super::types::{RucRow, SupplierFields, SupplierRow};

pub async fn add_supplier(ctx: &Context, fields: SupplierFields) -> Result<()> {
    let ctrl = ctx.suppliers(ctx.config.page_size);
    let created = ctrl.create(&Supplier::from(fields)).await.map_err(report)?;

    print_success(&format!("Created supplier: {}", created.name), ctx.quiet);
    if !ctx.quiet {
        print_single(&SupplierRow::from(created), ctx.format)?;
    }

    Ok(())
}

pub async fn update_supplier(
    ctx: &Context,
    id: i64,
    name: Option<String>,
    ruc: Option<String>,
    cellphone: Option<String>,
) -> Result<()> {
    if name.is_none() && ruc.is_none() && cellphone.is_none() {
        print_info("Nothing to update", ctx.quiet);
        return Ok(());
    }

    let ctrl = ctx.suppliers(ctx.config.page_size);
    let mut supplier = ctrl.get(id).await.map_err(report)?;
    if let Some(name) = name {
        supplier.name = name;
    }
    if let Some(ruc) = ruc {
        supplier.ruc = ruc;
    }
    if let Some(cellphone) = cellphone {
        supplier.cellphone = Some(cellphone).filter(|c| !c.trim().is_empty());
    }

    let updated = ctrl.save(&supplier).await.map_err(report)?;

    print_success(&format!("Updated supplier: {}", updated.name), ctx.quiet);
    if !ctx.quiet {
        print_single(&SupplierRow::from(updated), ctx.format)?;
    }

    Ok(())
}

pub async fn delete_supplier(ctx: &Context, id: i64, force: bool) -> Result<()> {
    let ctrl = ctx.suppliers(ctx.config.page_size);

    if !force {
        let supplier = ctrl.get(id).await.map_err(report)?;
        print_single(&SupplierRow::from(supplier), ctx.format)?;
        print_error("Use --force to confirm deletion");
        return Ok(());
    }

    ctrl.remove(id).await.map_err(report)?;
    print_success(&format!("Deleted supplier: {}", id), ctx.quiet);

    Ok(())
}

pub async fn lookup_ruc(ctx: &Context, ruc: String, save: bool) -> Result<()> {
    let record = ctx
        .backend
        .registry
        .supplier_by_ruc(&ruc)
        .await
        .map_err(report)?;

    if !save {
        print_single(&RucRow::new(ruc.trim(), &record), ctx.format)?;
        print_info("Use --save to create this supplier", ctx.quiet);
        return Ok(());
    }

    let mut draft = Supplier {
        ruc: ruc.trim().to_string(),
        ..Default::default()
    };
    record.apply_to_supplier(&mut draft);

    let ctrl = ctx.suppliers(ctx.config.page_size);
    let created = ctrl.create(&draft).await.map_err(report)?;
    print_success(&format!("Created supplier: {}", created.name), ctx.quiet);
    if !ctx.quiet {
        print_single(&SupplierRow::from(created), ctx.format)?;
    }

    Ok(())
}
