//! Error types for the session bootstrap service

use thiserror::Error;

use crate::profile::ProfileError;

/// Errors surfaced by the bootstrap operations
///
/// Best-effort profile writes (token exchange, login, register) never
/// produce an error here; their failures are logged at the discard site
/// and the operation answers from the identity alone. `ProfileStore` only
/// appears where a store failure must reach the caller (explicit profile
/// update).
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A required credential was absent from the request
    #[error("{0}")]
    MissingCredential(String),

    /// Token validation failed
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Sign-in was rejected; carries the provider's message when available
    #[error("{0}")]
    InvalidCredentials(String),

    /// Password shorter than the provider's minimum
    #[error("Password must be at least 6 characters long")]
    WeakPassword,

    /// The provider's backing storage is misconfigured; a deployment
    /// defect, not a user error
    #[error("{message}")]
    ProviderConfiguration {
        message: String,
        details: String,
        code: Option<String>,
    },

    /// The provider rejected the registration for a user-addressable reason
    #[error("{0}")]
    RegistrationRejected(String),

    /// Error from the profile store on an explicit update
    #[error("Profile store error: {0}")]
    ProfileStore(#[from] ProfileError),

    /// The provider could not be reached or answered outside its contract
    #[error("Provider error: {0}")]
    Provider(String),
}

impl BootstrapError {
    /// Log the error and return self, allowing method chaining at the
    /// point where the error is raised.
    pub fn log(self) -> Self {
        match &self {
            Self::MissingCredential(msg) => tracing::debug!("Missing credential: {}", msg),
            Self::InvalidToken => tracing::debug!("Invalid or expired token"),
            Self::InvalidCredentials(msg) => tracing::debug!("Invalid credentials: {}", msg),
            Self::WeakPassword => tracing::debug!("Password below minimum length"),
            Self::ProviderConfiguration { message, code, .. } => {
                tracing::error!(code = ?code, "Provider configuration error: {}", message)
            }
            Self::RegistrationRejected(msg) => tracing::debug!("Registration rejected: {}", msg),
            Self::ProfileStore(err) => tracing::error!("Profile store error: {}", err),
            Self::Provider(msg) => tracing::error!("Provider error: {}", msg),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<BootstrapError>();
    }

    #[test]
    fn test_error_display() {
        let err = BootstrapError::MissingCredential("Missing access token".to_string());
        assert_eq!(err.to_string(), "Missing access token");

        let err = BootstrapError::InvalidToken;
        assert_eq!(err.to_string(), "Invalid or expired token");

        let err = BootstrapError::InvalidCredentials("Invalid email or password".to_string());
        assert_eq!(err.to_string(), "Invalid email or password");

        let err = BootstrapError::WeakPassword;
        assert_eq!(
            err.to_string(),
            "Password must be at least 6 characters long"
        );

        let err = BootstrapError::ProviderConfiguration {
            message: "Database configuration error".to_string(),
            details: "broken trigger".to_string(),
            code: Some("unexpected_failure".to_string()),
        };
        assert_eq!(err.to_string(), "Database configuration error");

        let err = BootstrapError::RegistrationRejected("User already registered".to_string());
        assert_eq!(err.to_string(), "User already registered");
    }

    #[test]
    fn test_from_profile_error() {
        let profile_err = ProfileError::Storage("connection closed".to_string());
        let err: BootstrapError = profile_err.into();

        assert!(matches!(err, BootstrapError::ProfileStore(_)));
        assert_eq!(
            err.to_string(),
            "Profile store error: Storage error: connection closed"
        );
    }

    #[test]
    fn test_error_log_returns_self() {
        let err = BootstrapError::InvalidToken.log();
        assert!(matches!(err, BootstrapError::InvalidToken));
    }
}
