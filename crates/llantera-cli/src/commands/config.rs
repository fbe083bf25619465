//! Config commands
//!
//! Commands for inspecting the effective CLI configuration.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use llantera_core::config::{
    ENV_API_URL, ENV_DEBOUNCE_MS, ENV_PAGE_SIZE, ENV_RENEW_SECS, ENV_TIMEOUT_SECS, ENV_TOKEN_PATH,
};

use super::Context;
use crate::output::print_output;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
}

/// Config row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

pub async fn execute(ctx: &Context, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    let rows = vec![
        row("api_url", config.api_url.clone(), ENV_API_URL),
        row("page_size", config.page_size.to_string(), ENV_PAGE_SIZE),
        row("debounce_ms", config.debounce_ms.to_string(), ENV_DEBOUNCE_MS),
        row("renew_secs", config.renew_secs.to_string(), ENV_RENEW_SECS),
        row("timeout_secs", config.timeout_secs.to_string(), ENV_TIMEOUT_SECS),
        row("token_path", ctx.token_path.display().to_string(), ENV_TOKEN_PATH),
    ];
    print_output(&rows, ctx.format)?;
    Ok(())
}

fn row(key: &str, value: String, env_var: &str) -> ConfigRow {
    let source = match std::env::var(env_var) {
        Ok(v) if !v.trim().is_empty() => format!("env ({})", env_var),
        _ => "default".to_string(),
    };
    ConfigRow {
        key: key.to_string(),
        value,
        source,
    }
}
