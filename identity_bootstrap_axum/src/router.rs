use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use identity_bootstrap::SessionBootstrap;

use super::auth::{login, register, token_exchange};
use super::profile::{get_me, update_me};

/// Router for the `/auth` endpoints, typically nested as
/// `Router::new().nest("/auth", auth_router(service))`
pub fn auth_router(service: Arc<SessionBootstrap>) -> Router {
    Router::new()
        .route("/token", post(token_exchange))
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/me", get(get_me).put(update_me))
        .with_state(service)
}
