use thiserror::Error;

/// Errors reported by the identity provider, normalized into a taxonomy
/// the bootstrap service can act on.
#[derive(Debug, Error, Clone)]
pub enum ProviderError {
    /// The provider rejected the access token, or the token was empty/malformed
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Sign-in failed; carries the provider's message when it supplied one
    #[error("{0}")]
    InvalidCredentials(String),

    /// Sign-up was rejected; `code` is the provider's machine-readable error code
    #[error("{message}")]
    Rejected {
        message: String,
        code: Option<String>,
    },

    /// The provider could not be reached or answered outside its contract
    #[error("Provider request failed: {0}")]
    Network(String),

    /// The provider's response body could not be decoded
    #[error("Serde error: {0}")]
    Serde(String),
}
