use std::sync::Arc;

use axum::{Router, response::Redirect, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use identity_bootstrap::{
    FRONTEND_BASE_URL, HttpIdentityProvider, SessionBootstrap, SqlProfileStore,
    admin_emails_from_env,
};
use identity_bootstrap_axum::auth_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Create the profile tables before taking traffic
    identity_bootstrap::init().await?;

    let service = Arc::new(SessionBootstrap::new(
        Arc::new(HttpIdentityProvider::from_env()),
        Arc::new(SqlProfileStore),
        admin_emails_from_env(),
    ));

    let app = Router::new()
        .route("/", get(index))
        .nest("/auth", auth_router(service));

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Listening on http://0.0.0.0:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Anonymous visitors belong on the frontend sign-in view
async fn index() -> Redirect {
    Redirect::temporary(&format!("{}/signin", FRONTEND_BASE_URL.as_str()))
}
