//! Shared mocks for bootstrap flow tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use identity_bootstrap::{
    ExternalIdentity, IdentityProvider, LocalProfile, ProfileError, ProfilePatch, ProfileStore,
    ProviderError, ProviderSession, SignUpAttrs, SignUpOutcome,
};

pub fn test_identity(id: &str, email: &str) -> ExternalIdentity {
    ExternalIdentity {
        id: id.to_string(),
        email: email.to_string(),
        metadata_first_name: None,
        metadata_last_name: None,
        created_at: Utc::now(),
    }
}

/// Scriptable identity provider that records every call
pub struct MockProvider {
    /// token -> identity accepted by verify_token
    pub identities: HashMap<String, ExternalIdentity>,
    pub sign_in_result: Option<Result<ProviderSession, ProviderError>>,
    pub sign_up_result: Option<Result<SignUpOutcome, ProviderError>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            identities: HashMap::new(),
            sign_in_result: None,
            sign_up_result: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_token(mut self, token: &str, identity: ExternalIdentity) -> Self {
        self.identities.insert(token.to_string(), identity);
        self
    }

    pub fn with_sign_in(mut self, result: Result<ProviderSession, ProviderError>) -> Self {
        self.sign_in_result = Some(result);
        self
    }

    pub fn with_sign_up(mut self, result: Result<SignUpOutcome, ProviderError>) -> Self {
        self.sign_up_result = Some(result);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for MockProvider {
    async fn verify_token(&self, token: &str) -> Result<ExternalIdentity, ProviderError> {
        self.calls.lock().unwrap().push(format!("verify:{token}"));
        self.identities
            .get(token)
            .cloned()
            .ok_or(ProviderError::InvalidToken)
    }

    async fn sign_in(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.calls.lock().unwrap().push(format!("sign_in:{email}"));
        self.sign_in_result
            .clone()
            .unwrap_or(Err(ProviderError::InvalidCredentials(
                "Invalid email or password".to_string(),
            )))
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        _attrs: SignUpAttrs,
    ) -> Result<SignUpOutcome, ProviderError> {
        self.calls.lock().unwrap().push(format!("sign_up:{email}"));
        self.sign_up_result
            .clone()
            .unwrap_or(Err(ProviderError::Rejected {
                message: "unscripted".to_string(),
                code: None,
            }))
    }
}

/// In-memory profile store with write counting and failure injection
pub struct MemoryProfileStore {
    pub rows: Mutex<HashMap<String, LocalProfile>>,
    pub writes: AtomicUsize,
    pub fail_writes: bool,
    pub fail_reads: bool,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            writes: AtomicUsize::new(0),
            fail_writes: false,
            fail_reads: false,
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn row(&self, id: &str) -> Option<LocalProfile> {
        self.rows.lock().unwrap().get(id).cloned()
    }

    pub fn insert_row(&self, profile: LocalProfile) {
        self.rows.lock().unwrap().insert(profile.id.clone(), profile);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get_profile(&self, id: &str) -> Result<Option<LocalProfile>, ProfileError> {
        if self.fail_reads {
            return Err(ProfileError::Storage("read failure injected".to_string()));
        }
        Ok(self.rows.lock().unwrap().get(id).cloned())
    }

    async fn upsert_profile(&self, profile: LocalProfile) -> Result<LocalProfile, ProfileError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(ProfileError::Storage("write failure injected".to_string()));
        }
        self.rows
            .lock()
            .unwrap()
            .insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }

    async fn patch_profile(
        &self,
        id: &str,
        patch: ProfilePatch,
    ) -> Result<LocalProfile, ProfileError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(ProfileError::Storage("write failure injected".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        let profile = rows
            .get_mut(id)
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))?;
        if let Some(first) = patch.first_name {
            profile.first_name.get_or_insert(first);
        }
        if let Some(last) = patch.last_name {
            profile.last_name.get_or_insert(last);
        }
        profile.updated_at = patch.updated_at;
        Ok(profile.clone())
    }
}
