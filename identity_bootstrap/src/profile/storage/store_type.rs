use async_trait::async_trait;

use crate::profile::errors::ProfileError;
use crate::profile::types::{LocalProfile, ProfilePatch};
use crate::storage::PROFILE_DATA_STORE;

use super::postgres::*;
use super::sqlite::*;

/// Capability boundary to the profile store
///
/// The store owns query execution and the uniqueness constraint on `id`;
/// callers rely on `upsert_profile` resolving conflicts on `id` so that
/// concurrent first logins for one identity converge on a single row.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile by its identity id
    async fn get_profile(&self, id: &str) -> Result<Option<LocalProfile>, ProfileError>;

    /// Insert or fully replace a profile, keyed on `id`
    async fn upsert_profile(&self, profile: LocalProfile) -> Result<LocalProfile, ProfileError>;

    /// Apply a fill-only backfill patch to an existing profile
    async fn patch_profile(
        &self,
        id: &str,
        patch: ProfilePatch,
    ) -> Result<LocalProfile, ProfileError>;
}

/// sqlx-backed [`ProfileStore`] over the configured SQLite/Postgres pool
pub struct SqlProfileStore;

impl SqlProfileStore {
    /// Initialize the profile tables
    pub async fn init() -> Result<(), ProfileError> {
        let store = PROFILE_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => create_tables_sqlite(pool).await,
            (_, Some(pool)) => create_tables_postgres(pool).await,
            _ => Err(ProfileError::Storage(
                "Unsupported database type".to_string(),
            )),
        }
    }
}

#[async_trait]
impl ProfileStore for SqlProfileStore {
    #[tracing::instrument(skip(self), fields(profile_id = %id))]
    async fn get_profile(&self, id: &str) -> Result<Option<LocalProfile>, ProfileError> {
        let store = PROFILE_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            get_profile_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            get_profile_postgres(pool, id).await
        } else {
            Err(ProfileError::Storage(
                "Unsupported database type".to_string(),
            ))
        };

        match &result {
            Ok(found) => {
                tracing::debug!(found = found.is_some(), "Profile lookup completed");
            }
            Err(e) => {
                tracing::error!(error = %e, "Profile lookup failed");
            }
        }

        result
    }

    #[tracing::instrument(skip(self, profile), fields(profile_id = %profile.id))]
    async fn upsert_profile(&self, profile: LocalProfile) -> Result<LocalProfile, ProfileError> {
        let store = PROFILE_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            upsert_profile_sqlite(pool, profile).await
        } else if let Some(pool) = store.as_postgres() {
            upsert_profile_postgres(pool, profile).await
        } else {
            Err(ProfileError::Storage(
                "Unsupported database type".to_string(),
            ))
        };

        match &result {
            Ok(stored) => {
                tracing::info!(profile_id = %stored.id, "Profile upsert completed");
            }
            Err(e) => {
                tracing::error!(error = %e, "Profile upsert failed");
            }
        }

        result
    }

    #[tracing::instrument(skip(self, patch), fields(profile_id = %id))]
    async fn patch_profile(
        &self,
        id: &str,
        patch: ProfilePatch,
    ) -> Result<LocalProfile, ProfileError> {
        let store = PROFILE_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            patch_profile_sqlite(pool, id, &patch).await
        } else if let Some(pool) = store.as_postgres() {
            patch_profile_postgres(pool, id, &patch).await
        } else {
            Err(ProfileError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }
}
