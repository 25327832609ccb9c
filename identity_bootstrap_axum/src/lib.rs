//! identity-bootstrap-axum - Axum integration for identity-bootstrap
//!
//! Mounts the session-bootstrap operations as the `/auth` HTTP surface:
//! token exchange, password login, registration, and profile fetch/update.

mod auth;
mod error;
mod extract;
mod profile;
mod router;

pub use error::ApiError;
pub use extract::BearerToken;
pub use router::auth_router;
