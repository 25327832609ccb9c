use crate::profile::CanonicalUser;

/// Result of a successful token exchange
#[derive(Debug, Clone, PartialEq)]
pub struct TokenExchangeResponse {
    /// The bearer token that was exchanged, passed through unmodified
    pub session_token: String,
    pub user: CanonicalUser,
}

/// Result of a successful password login
#[derive(Debug, Clone, PartialEq)]
pub struct LoginResponse {
    pub session_token: String,
    pub email: String,
    /// Stored name when present (possibly just backfilled), else identity metadata
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Result of a successful registration
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    /// The provider granted a session immediately
    Active { session_token: String, email: String },
    /// The account was created but needs email confirmation first
    PendingVerification { email: String },
}
