use chrono::Utc;

use crate::profile::{CanonicalUser, LocalProfile, ProfileUpdate};

use super::SessionBootstrap;
use super::errors::BootstrapError;

impl SessionBootstrap {
    /// Display merge of the stored row (if any) with identity metadata.
    /// Read-only: no write is ever staged here.
    pub async fn get_profile(&self, bearer_token: &str) -> Result<CanonicalUser, BootstrapError> {
        let identity = self
            .provider()
            .verify_token(bearer_token)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                BootstrapError::InvalidToken
            })?;

        let stored = match self.profiles().get_profile(&identity.id).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(profile_id = %identity.id, error = %e, "Profile lookup failed");
                None
            }
        };

        Ok(self.canonical_user(&identity, stored.as_ref()))
    }

    /// Apply an explicit, presence-sensitive profile edit.
    ///
    /// Unlike the reconciliation paths, store failures are surfaced here:
    /// the caller asked for a write and must learn when it did not happen.
    pub async fn update_profile(
        &self,
        bearer_token: &str,
        update: ProfileUpdate,
    ) -> Result<CanonicalUser, BootstrapError> {
        let identity = self
            .provider()
            .verify_token(bearer_token)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                BootstrapError::InvalidToken
            })?;

        let existing = self.profiles().get_profile(&identity.id).await?;
        let mut profile = existing
            .unwrap_or_else(|| LocalProfile::new(identity.id.clone(), identity.email.clone()));

        update.apply(&mut profile);
        profile.updated_at = Utc::now();

        let stored = self.profiles().upsert_profile(profile).await?;

        Ok(self.canonical_user(&identity, Some(&stored)))
    }
}
