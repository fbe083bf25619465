//! Auth module
//!
//! Client-side session handling using trait-based dependency injection for
//! testability.
//!
//! ## Structure
//! - `session.rs` - Session state, route decisions
//! - `token_store.rs` - TokenStore trait, memory and file implementations
//! - `ports.rs` - AuthGateway and Router traits
//! - `guard.rs` - SessionGuard (verification, login/logout, renew timer)
//! - `claims.rs` - Unverified JWT claim inspection for display

pub mod claims;
pub mod guard;
pub mod ports;
pub mod session;
pub mod token_store;


pub use claims::{peek_claims, TokenClaims};
pub use guard::SessionGuard;
pub use ports::{AuthGateway, NoopRouter, Router};
pub use session::{GuardCheck, RouteDecision, Session, SessionStatus};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
