use crate::profile::{LocalProfile, MergeOutcome, WriteOp, merge};
use crate::provider::ExternalIdentity;

use super::SessionBootstrap;
use super::errors::BootstrapError;
use super::types::TokenExchangeResponse;

impl SessionBootstrap {
    /// Validate a bearer token and reconcile its identity with the
    /// profile store.
    ///
    /// Idempotent: a second exchange with the same token finds the
    /// reconciled row and stages no further write. Store failures do not
    /// fail the exchange; the canonical payload stays derivable from the
    /// identity alone.
    pub async fn token_exchange(
        &self,
        bearer_token: &str,
    ) -> Result<TokenExchangeResponse, BootstrapError> {
        if bearer_token.trim().is_empty() {
            return Err(BootstrapError::MissingCredential("Missing access token".to_string()).log());
        }

        let identity = self
            .provider()
            .verify_token(bearer_token)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                BootstrapError::InvalidToken
            })?;

        let profile = self.reconcile_profile(&identity).await;

        Ok(TokenExchangeResponse {
            session_token: bearer_token.to_string(),
            user: self.canonical_user(&identity, profile.as_ref()),
        })
    }

    /// Best-effort reconciliation of a verified identity into the store.
    ///
    /// Runs the merge engine against the stored row and applies the
    /// computed write. Lookup and write failures are deliberately
    /// swallowed here with a warning; callers on the token-exchange and
    /// login paths still answer from the merged in-memory profile.
    pub(super) async fn reconcile_profile(
        &self,
        identity: &ExternalIdentity,
    ) -> Option<LocalProfile> {
        let existing = match self.profiles().get_profile(&identity.id).await {
            Ok(existing) => existing,
            Err(e) => {
                tracing::warn!(profile_id = %identity.id, error = %e, "Profile lookup failed");
                return None;
            }
        };

        let MergeOutcome { profile, write } = merge(identity, existing.as_ref());

        let written = match write {
            WriteOp::NoOp => return Some(profile),
            WriteOp::Insert => self.profiles().upsert_profile(profile.clone()).await,
            WriteOp::Patch(patch) => self.profiles().patch_profile(&identity.id, patch).await,
        };

        match written {
            Ok(stored) => Some(stored),
            Err(e) => {
                tracing::warn!(profile_id = %identity.id, error = %e, "Profile write failed");
                Some(profile)
            }
        }
    }
}
