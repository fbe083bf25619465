//! Auth commands
//!
//! Sign in, sign up, sign out and session status.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use llantera_core::auth::{RouteDecision, Session, TokenClaims};
use llantera_core::NewAccount;

use super::{report, Context};
use crate::output::{or_dash, print_output, print_success, print_warning};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in and store the session token
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password (or set LLANTERA_PASSWORD env var)
        #[arg(short, long, env = "LLANTERA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (or set LLANTERA_PASSWORD env var)
        #[arg(short, long, env = "LLANTERA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Verify the stored session and show who is signed in
    Status,
}

/// Session field row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct SessionRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl SessionRow {
    fn new(field: &str, value: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

pub async fn execute(ctx: &Context, action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Login { username, password } => login(ctx, username, password).await,
        AuthAction::Register {
            username,
            email,
            password,
        } => register(ctx, username, email, password).await,
        AuthAction::Logout => logout(ctx).await,
        AuthAction::Status => status(ctx).await,
    }
}

async fn login(ctx: &Context, username: String, password: String) -> Result<()> {
    let user = ctx
        .guard
        .login(username.trim(), &password)
        .await
        .map_err(report)?;

    print_success(&format!("Signed in as {}", user.username), ctx.quiet);
    Ok(())
}

async fn register(ctx: &Context, username: String, email: String, password: String) -> Result<()> {
    let account = NewAccount {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password,
    };
    let user = ctx.guard.register(&account).await.map_err(report)?;

    print_success(
        &format!("Account created, signed in as {}", user.username),
        ctx.quiet,
    );
    Ok(())
}

async fn logout(ctx: &Context) -> Result<()> {
    ctx.guard.logout().await;
    print_success("Signed out", ctx.quiet);
    Ok(())
}

async fn status(ctx: &Context) -> Result<()> {
    ctx.guard.initialize().await;
    let session = ctx.guard.session().await;
    let decision = ctx.guard.route_decision().await;

    if decision == RouteDecision::Redirect && !session.has_token() {
        print_warning("Not signed in", ctx.quiet);
    }

    let rows = session_rows(ctx, &session, decision, ctx.guard.token_claims());
    print_output(&rows, ctx.format)?;
    Ok(())
}

fn decision_label(decision: RouteDecision) -> &'static str {
    match decision {
        RouteDecision::Wait => "wait",
        RouteDecision::Render => "render",
        RouteDecision::Redirect => "redirect to login",
    }
}

fn session_rows(
    ctx: &Context,
    session: &Session,
    decision: RouteDecision,
    claims: Option<TokenClaims>,
) -> Vec<SessionRow> {
    let user = session.user.as_ref();
    let mut rows = vec![
        SessionRow::new("Status", session.status.to_string()),
        SessionRow::new("Decision", decision_label(decision)),
        SessionRow::new("User", or_dash(user.map(|u| u.username.as_str()))),
        SessionRow::new("Email", or_dash(user.and_then(|u| u.email.as_deref()))),
        SessionRow::new(
            "Roles",
            user.map(|u| u.roles.join(", "))
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| "-".to_string()),
        ),
    ];

    if let Some(claims) = claims {
        let expires = claims
            .expires_at()
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string());
        rows.push(SessionRow::new("Token expires", or_dash(expires.as_deref())));
    }
    if let Some(checked_at) = session.checked_at {
        rows.push(SessionRow::new(
            "Checked at",
            checked_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ));
    }

    rows.push(SessionRow::new("Last error", or_dash(session.last_error.as_deref())));
    rows.push(SessionRow::new("Token file", ctx.token_path.display().to_string()));
    rows
}
