use std::sync::LazyLock;

use async_trait::async_trait;

use super::config::{PROVIDER_API_KEY, PROVIDER_BASE_URL};
use super::errors::ProviderError;
use super::types::{
    ExternalIdentity, ProviderErrorBody, ProviderSession, ProviderUserInfo, SignUpAttrs,
    SignUpOutcome, TokenGrantResponse,
};

static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// Capability boundary to the external identity provider
///
/// The provider owns credential verification and token issuance; this
/// crate only consumes the results. Calls are never retried here: a
/// retried `verify_token` must reuse the same token value, and the caller
/// is the one holding it.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Validate an access token and return the identity it belongs to
    async fn verify_token(&self, token: &str) -> Result<ExternalIdentity, ProviderError>;

    /// Exchange email/password credentials for a provider session
    async fn sign_in(&self, email: &str, password: &str)
    -> Result<ProviderSession, ProviderError>;

    /// Create an account; the session may be withheld pending email confirmation
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        attrs: SignUpAttrs,
    ) -> Result<SignUpOutcome, ProviderError>;
}

/// GoTrue-style HTTP implementation of [`IdentityProvider`]
pub struct HttpIdentityProvider {
    base_url: String,
    api_key: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Construct from `PROVIDER_BASE_URL` / `PROVIDER_API_KEY`
    pub fn from_env() -> Self {
        Self::new(PROVIDER_BASE_URL.as_str(), PROVIDER_API_KEY.as_str())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url.trim_end_matches('/'))
    }

    async fn read_error_body(response: reqwest::Response) -> ProviderErrorBody {
        let body = response.text().await.unwrap_or_default();
        serde_json::from_str(&body).unwrap_or_default()
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn verify_token(&self, token: &str) -> Result<ExternalIdentity, ProviderError> {
        if token.trim().is_empty() {
            return Err(ProviderError::InvalidToken);
        }

        let response = HTTP_CLIENT
            .get(self.endpoint("user"))
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Token verification rejected");
            return Err(ProviderError::InvalidToken);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let info: ProviderUserInfo = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Serde(format!("Failed to deserialize user info: {e}")))?;

        Ok(ExternalIdentity::from(info))
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        let response = HTTP_CLIENT
            .post(self.endpoint("token?grant_type=password"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error_body = Self::read_error_body(response).await;
            let message = error_body
                .message()
                .unwrap_or("Invalid email or password")
                .to_string();
            return Err(ProviderError::InvalidCredentials(message));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let grant: TokenGrantResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Serde(format!("Failed to deserialize token grant: {e}")))?;

        Ok(ProviderSession {
            identity: ExternalIdentity::from(grant.user),
            access_token: grant.access_token,
        })
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        attrs: SignUpAttrs,
    ) -> Result<SignUpOutcome, ProviderError> {
        let response = HTTP_CLIENT
            .post(self.endpoint("signup"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "data": {
                    "first_name": attrs.first_name.unwrap_or_default(),
                    "last_name": attrs.last_name.unwrap_or_default(),
                },
            }))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error_body = Self::read_error_body(response).await;
            let message = error_body
                .message()
                .unwrap_or("Failed to create user")
                .to_string();
            return Err(ProviderError::Rejected {
                message,
                code: error_body.error_code,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        // With email confirmation disabled the provider answers with a token
        // grant; with confirmation enabled it answers with the bare user.
        if let Ok(grant) = serde_json::from_str::<TokenGrantResponse>(&body) {
            return Ok(SignUpOutcome::Active(ProviderSession {
                identity: ExternalIdentity::from(grant.user),
                access_token: grant.access_token,
            }));
        }

        let info: ProviderUserInfo = serde_json::from_str(&body).map_err(|e| {
            ProviderError::Serde(format!("Failed to deserialize sign-up response: {e}"))
        })?;

        Ok(SignUpOutcome::PendingVerification(ExternalIdentity::from(
            info,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let provider = HttpIdentityProvider::new("http://localhost:9999/", "key");
        assert_eq!(
            provider.endpoint("token?grant_type=password"),
            "http://localhost:9999/auth/v1/token?grant_type=password"
        );

        let provider = HttpIdentityProvider::new("http://localhost:9999", "key");
        assert_eq!(provider.endpoint("user"), "http://localhost:9999/auth/v1/user");
    }

    /// An empty or whitespace token is rejected locally, before any
    /// network traffic.
    #[tokio::test]
    async fn test_verify_token_rejects_empty_token() {
        let provider = HttpIdentityProvider::new("http://localhost:1", "key");

        let result = provider.verify_token("").await;
        assert!(matches!(result, Err(ProviderError::InvalidToken)));

        let result = provider.verify_token("   ").await;
        assert!(matches!(result, Err(ProviderError::InvalidToken)));
    }
}
