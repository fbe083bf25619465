//! Llantera CLI - customer and supplier administration
//!
//! A command-line front end for the tire retailer backend: sign in, browse
//! and edit customers and suppliers, look up registry data and export.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "llantera")]
#[command(author, version, about = "Tire retailer administration CLI", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: table (default) or json
    #[arg(long, global = true, value_enum, ignore_case = true, default_value = "table")]
    format: output::OutputFormat,

    /// Suppress progress messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Override backend URL (or set LLANTERA_API_URL env var)
    #[arg(long, env = "LLANTERA_API_URL", global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, sign up, sign out and session status
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },

    /// Manage customers
    Customer {
        #[command(subcommand)]
        action: commands::customer::CustomerAction,
    },

    /// Manage suppliers
    Supplier {
        #[command(subcommand)]
        action: commands::supplier::SupplierAction,
    },

    /// Session user and collection totals
    Dashboard,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Set up backend URL if provided
    if let Some(url) = &cli.api_url {
        std::env::set_var(llantera_core::config::ENV_API_URL, url);
    }

    let config = llantera_core::ClientConfig::from_env()?;

    // Create context for commands
    let ctx = commands::Context::new(config, cli.format, cli.quiet)?;

    let result = match cli.command {
        Commands::Auth { action } => commands::auth::execute(&ctx, action).await,
        Commands::Customer { action } => commands::customer::execute(&ctx, action).await,
        Commands::Supplier { action } => commands::supplier::execute(&ctx, action).await,
        Commands::Dashboard => commands::dashboard::execute(&ctx).await,
        Commands::Config { action } => commands::config::execute(&ctx, action).await,
    };

    ctx.guard.shutdown();
    result
}
