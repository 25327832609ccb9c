mod credentials;
mod errors;
mod exchange;
mod profile_flow;
mod types;

pub use errors::BootstrapError;
pub use types::{LoginResponse, RegisterOutcome, TokenExchangeResponse};

use std::collections::HashSet;
use std::sync::Arc;

use crate::profile::{CanonicalUser, LocalProfile, ProfileStore};
use crate::provider::{ExternalIdentity, IdentityProvider};

/// Orchestrates token validation, profile reconciliation, and response
/// assembly for every client entry point
///
/// Stateless per request: each operation is at most one round trip to the
/// provider plus one to the profile store, neither retried. The admin
/// allow-list is injected once at construction.
pub struct SessionBootstrap {
    provider: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
    admin_emails: HashSet<String>,
}

impl SessionBootstrap {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileStore>,
        admin_emails: HashSet<String>,
    ) -> Self {
        Self {
            provider,
            profiles,
            admin_emails,
        }
    }

    pub(super) fn provider(&self) -> &dyn IdentityProvider {
        self.provider.as_ref()
    }

    pub(super) fn profiles(&self) -> &dyn ProfileStore {
        self.profiles.as_ref()
    }

    pub(super) fn canonical_user(
        &self,
        identity: &ExternalIdentity,
        profile: Option<&LocalProfile>,
    ) -> CanonicalUser {
        CanonicalUser::assemble(identity, profile, &self.admin_emails)
    }
}
