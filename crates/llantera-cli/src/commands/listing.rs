//! Paged listing shared by customer and supplier commands

use anyhow::{anyhow, bail, Result};
use clap::Args;

use llantera_core::collection::{
    CollectionController, CollectionGateway, CollectionSnapshot, FetchOutcome,
};

use crate::commands::Context;
use crate::output::{print_info, print_warning};

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Search term (name, DNI or RUC)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Page number, starting at 1
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Records per page (defaults to LLANTERA_PAGE_SIZE or 10)
    #[arg(long)]
    pub size: Option<u32>,
}

impl ListArgs {
    pub fn page_size(&self, ctx: &Context) -> u32 {
        self.size.unwrap_or(ctx.config.page_size)
    }

    fn page_index(&self) -> u32 {
        self.page.saturating_sub(1)
    }
}

/// Load the requested page.
///
/// A search term goes through the debounced path; plain paging goes through
/// a direct fetch.
pub async fn load_page<G: CollectionGateway>(
    ctrl: &CollectionController<G>,
    args: &ListArgs,
    page_size: u32,
) -> Result<CollectionSnapshot<G::Entity>> {
    let outcome = match args.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => {
            ctrl.search(term).await;
            match ctrl.settle_search().await {
                Some(FetchOutcome::Applied) if args.page_index() > 0 => ctrl
                    .change_page(i64::from(args.page_index()))
                    .await
                    .ok_or_else(|| anyhow!("Page {} is out of range", args.page))?,
                Some(outcome) => outcome,
                None => bail!("Search was cancelled"),
            }
        }
        _ => ctrl.fetch("", args.page_index(), page_size).await,
    };

    if let FetchOutcome::Failed(message) = outcome {
        bail!(message);
    }
    Ok(ctrl.snapshot().await)
}

/// Footer line under a listing
pub fn print_page_footer<T>(ctx: &Context, snapshot: &CollectionSnapshot<T>, noun: &str) {
    let page = &snapshot.page;
    if snapshot.is_orphaned_page() {
        print_warning(
            &format!("Page {} is empty; try --page {}", page.page_index + 1, page.page_index),
            ctx.quiet,
        );
    }
    print_info(
        &format!(
            "Page {}/{} - {} {}",
            page.page_index + 1,
            page.total_pages.max(1),
            page.total_elements,
            noun
        ),
        ctx.quiet,
    );
}
