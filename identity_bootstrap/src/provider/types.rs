use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Identity asserted by the external provider for a validated request
///
/// Ephemeral: reconstructed on every successful `verify_token`/`sign_in`/
/// `sign_up` call and never persisted as-is. `id` is the provider-assigned
/// stable identifier; the metadata name fields are owned by the provider
/// and may be absent or blank.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalIdentity {
    pub id: String,
    pub email: String,
    pub metadata_first_name: Option<String>,
    pub metadata_last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A provider-granted session: the identity plus its opaque bearer token
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSession {
    pub identity: ExternalIdentity,
    pub access_token: String,
}

/// Name attributes forwarded to the provider at sign-up
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignUpAttrs {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Result of a successful sign-up
///
/// `PendingVerification` is a success state, not an error: the provider
/// created the account but withholds a session until the email address is
/// confirmed.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// The provider granted a session immediately
    Active(ProviderSession),
    /// The account exists but needs email confirmation before a session is issued
    PendingVerification(ExternalIdentity),
}

/// Raw user object as the provider's auth endpoints return it
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ProviderUserInfo {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: ProviderUserMetadata,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct ProviderUserMetadata {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl From<ProviderUserInfo> for ExternalIdentity {
    fn from(info: ProviderUserInfo) -> Self {
        Self {
            id: info.id,
            email: info.email.unwrap_or_default(),
            metadata_first_name: info.user_metadata.first_name,
            metadata_last_name: info.user_metadata.last_name,
            created_at: info.created_at,
        }
    }
}

/// Token grant response from the password sign-in (and immediate sign-up) flows
#[derive(Debug, Deserialize)]
pub(super) struct TokenGrantResponse {
    pub access_token: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub refresh_token: Option<String>,
    pub user: ProviderUserInfo,
}

/// Error body the provider attaches to non-2xx auth responses
///
/// The field names vary by endpoint generation; `message()` picks the
/// first human-readable one present.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ProviderErrorBody {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ProviderErrorBody {
    pub(super) fn message(&self) -> Option<&str> {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error_description.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// A full provider user object converts into an ExternalIdentity with
    /// all metadata fields carried over.
    #[test]
    fn test_user_info_into_identity() {
        let json_data = json!({
            "id": "9f8d7c6b",
            "email": "ada@example.com",
            "user_metadata": {
                "first_name": "Ada",
                "last_name": "Lovelace"
            },
            "created_at": "2024-05-01T12:00:00Z"
        });

        let info: ProviderUserInfo =
            serde_json::from_value(json_data).expect("valid user info should deserialize");
        let identity = ExternalIdentity::from(info);

        assert_eq!(identity.id, "9f8d7c6b");
        assert_eq!(identity.email, "ada@example.com");
        assert_eq!(identity.metadata_first_name.as_deref(), Some("Ada"));
        assert_eq!(identity.metadata_last_name.as_deref(), Some("Lovelace"));
    }

    /// Providers may omit email and metadata entirely; the identity then
    /// carries an empty email and no names.
    #[test]
    fn test_user_info_minimal() {
        let json_data = json!({
            "id": "9f8d7c6b",
            "created_at": "2024-05-01T12:00:00Z"
        });

        let info: ProviderUserInfo =
            serde_json::from_value(json_data).expect("minimal user info should deserialize");
        let identity = ExternalIdentity::from(info);

        assert_eq!(identity.email, "");
        assert_eq!(identity.metadata_first_name, None);
        assert_eq!(identity.metadata_last_name, None);
    }

    #[test]
    fn test_token_grant_deserialization() {
        let json_data = json!({
            "access_token": "eyJ.access.token",
            "refresh_token": "refresh-value",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": {
                "id": "9f8d7c6b",
                "email": "ada@example.com",
                "created_at": "2024-05-01T12:00:00Z"
            }
        });

        let grant: TokenGrantResponse =
            serde_json::from_value(json_data).expect("valid grant should deserialize");

        assert_eq!(grant.access_token, "eyJ.access.token");
        assert_eq!(grant.user.id, "9f8d7c6b");
    }

    /// A bare user body (no access_token) must not parse as a token grant;
    /// the sign-up flow relies on this to detect pending verification.
    #[test]
    fn test_token_grant_requires_access_token() {
        let json_data = json!({
            "id": "9f8d7c6b",
            "email": "ada@example.com",
            "created_at": "2024-05-01T12:00:00Z"
        });

        let grant: Result<TokenGrantResponse, _> = serde_json::from_value(json_data);
        assert!(grant.is_err());
    }

    #[test]
    fn test_error_body_message_precedence() {
        let body: ProviderErrorBody = serde_json::from_value(json!({
            "code": 400,
            "error_code": "user_already_exists",
            "msg": "User already registered"
        }))
        .expect("error body should deserialize");
        assert_eq!(body.message(), Some("User already registered"));
        assert_eq!(body.error_code.as_deref(), Some("user_already_exists"));

        let body: ProviderErrorBody = serde_json::from_value(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        }))
        .expect("error body should deserialize");
        assert_eq!(body.message(), Some("Invalid login credentials"));

        let body: ProviderErrorBody =
            serde_json::from_value(json!({})).expect("empty body should deserialize");
        assert_eq!(body.message(), None);
    }
}
