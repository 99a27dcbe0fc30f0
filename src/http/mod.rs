//! HTTP API
//!
//! Thin axum surface over the catalog, the booking collaborator, the
//! activity monitor, and the concierge.

mod handlers;
mod routes;
mod state;
mod validation;

pub use routes::create_router;
pub use state::AppState;
pub use validation::{validate_contact, validate_email};
