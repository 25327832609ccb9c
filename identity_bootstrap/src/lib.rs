//! identity-bootstrap - Identity reconciliation and session bootstrap
//!
//! This crate takes tokens issued by an external identity provider,
//! validates them, reconciles the resulting identity against a locally
//! owned profile record, and produces a single canonical session/user
//! payload for every client entry point (password login, registration,
//! token exchange, and the email-confirmation callback).

mod bootstrap;
mod callback;
mod config;
mod profile;
mod provider;
mod storage;

#[cfg(test)]
mod test_utils;

pub use bootstrap::{
    BootstrapError, LoginResponse, RegisterOutcome, SessionBootstrap, TokenExchangeResponse,
};

pub use callback::{
    CallbackEnv, CallbackError, CallbackOutcome, CallbackReconciler, CallbackRequest,
    CallbackState, ERROR_REDIRECT_DELAY, ExchangedSession, RedirectTarget, RedirectTimer,
    SUCCESS_REDIRECT_DELAY,
};

pub use config::{FRONTEND_BASE_URL, admin_emails_from_env};

pub use profile::{
    CanonicalUser, LocalProfile, MergeOutcome, ProfileError, ProfilePatch, ProfileStore,
    ProfileUpdate, SqlProfileStore, WriteOp, merge,
};

pub use provider::{
    ExternalIdentity, HttpIdentityProvider, IdentityProvider, ProviderError, ProviderSession,
    SignUpAttrs, SignUpOutcome,
};

/// Initialize the profile storage layer
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    SqlProfileStore::init().await?;
    Ok(())
}
