//! Collection module
//!
//! Paginated, searchable views over remote CRUD resources.
//!
//! ## Structure
//! - `gateway.rs` - CollectionGateway trait
//! - `state.rs` - Displayed page, request state, fetch outcomes
//! - `controller.rs` - CollectionController (debounced search, stale-response
//!   rejection, optimistic mutations)

pub mod controller;
pub mod gateway;
pub mod state;


pub use controller::{CollectionController, Validator};
pub use gateway::CollectionGateway;
pub use state::{CollectionPage, CollectionSnapshot, FetchOutcome, RequestState};
