use crate::profile::LocalProfile;
use crate::provider::{ProviderError, SignUpAttrs, SignUpOutcome};

use super::SessionBootstrap;
use super::errors::BootstrapError;
use super::types::{LoginResponse, RegisterOutcome};

/// Minimum password length the provider enforces; checked here so a
/// too-short password never reaches the provider at all.
const MIN_PASSWORD_LEN: usize = 6;

impl SessionBootstrap {
    /// Sign in with email/password and reconcile the profile.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, BootstrapError> {
        if email.is_empty() || password.is_empty() {
            return Err(BootstrapError::MissingCredential(
                "Email and password are required".to_string(),
            )
            .log());
        }

        let session = self
            .provider()
            .sign_in(email, password)
            .await
            .map_err(|e| match e {
                ProviderError::InvalidCredentials(message) => {
                    BootstrapError::InvalidCredentials(message).log()
                }
                ProviderError::Rejected { message, .. } => {
                    BootstrapError::InvalidCredentials(message).log()
                }
                ProviderError::InvalidToken => {
                    BootstrapError::InvalidCredentials("Invalid email or password".to_string())
                        .log()
                }
                ProviderError::Network(msg) | ProviderError::Serde(msg) => {
                    BootstrapError::Provider(msg).log()
                }
            })?;

        let profile = self.reconcile_profile(&session.identity).await;

        // Prefer the stored (possibly just-patched) names over raw metadata
        let (first_name, last_name) = match &profile {
            Some(profile) => (profile.first_name.clone(), profile.last_name.clone()),
            None => (
                session.identity.metadata_first_name.clone(),
                session.identity.metadata_last_name.clone(),
            ),
        };

        Ok(LoginResponse {
            session_token: session.access_token,
            email: session.identity.email,
            first_name,
            last_name,
        })
    }

    /// Create an account with the provider and, when a session is granted
    /// immediately, seed the profile from the caller-supplied names.
    ///
    /// When the provider withholds the session pending email confirmation
    /// there is no verified identity to key a row on yet, so no profile
    /// is written.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<RegisterOutcome, BootstrapError> {
        if email.is_empty() || password.is_empty() {
            return Err(BootstrapError::MissingCredential(
                "Email and password are required".to_string(),
            )
            .log());
        }

        if password.len() < MIN_PASSWORD_LEN {
            return Err(BootstrapError::WeakPassword.log());
        }

        let attrs = SignUpAttrs {
            first_name: first_name.clone(),
            last_name: last_name.clone(),
        };

        let outcome = self
            .provider()
            .sign_up(email, password, attrs)
            .await
            .map_err(|e| classify_signup_failure(e).log())?;

        match outcome {
            SignUpOutcome::Active(session) => {
                // At registration time the caller is the authoritative
                // source for the name, not the provider metadata.
                let mut profile = LocalProfile::new(
                    session.identity.id.clone(),
                    session.identity.email.clone(),
                );
                profile.first_name = first_name.filter(|v| !v.trim().is_empty());
                profile.last_name = last_name.filter(|v| !v.trim().is_empty());

                if let Err(e) = self.profiles().upsert_profile(profile).await {
                    tracing::warn!(profile_id = %session.identity.id, error = %e, "Profile write failed");
                }

                Ok(RegisterOutcome::Active {
                    session_token: session.access_token,
                    email: session.identity.email,
                })
            }
            SignUpOutcome::PendingVerification(identity) => {
                tracing::debug!(profile_id = %identity.id, "Registration pending email verification");
                Ok(RegisterOutcome::PendingVerification {
                    email: identity.email,
                })
            }
        }
    }
}

/// Split provider sign-up failures into deployment defects (broken
/// storage/trigger on the provider side) and ordinary user-addressable
/// rejections.
fn classify_signup_failure(err: ProviderError) -> BootstrapError {
    match err {
        ProviderError::Rejected { message, code } => {
            if code.as_deref() == Some("unexpected_failure") || message.contains("Database error") {
                BootstrapError::ProviderConfiguration {
                    message:
                        "Database configuration error. Please check the identity provider's database setup."
                            .to_string(),
                    details:
                        "This usually indicates a missing or broken database trigger on the provider side. Re-run the provider's user-table setup script."
                            .to_string(),
                    code,
                }
            } else {
                BootstrapError::RegistrationRejected(message)
            }
        }
        ProviderError::InvalidCredentials(message) => BootstrapError::RegistrationRejected(message),
        ProviderError::InvalidToken => {
            BootstrapError::RegistrationRejected("Failed to create user".to_string())
        }
        ProviderError::Network(msg) | ProviderError::Serde(msg) => BootstrapError::Provider(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_trigger_malfunction_by_code() {
        let err = classify_signup_failure(ProviderError::Rejected {
            message: "something broke".to_string(),
            code: Some("unexpected_failure".to_string()),
        });
        assert!(matches!(err, BootstrapError::ProviderConfiguration { .. }));
    }

    #[test]
    fn test_classify_trigger_malfunction_by_message() {
        let err = classify_signup_failure(ProviderError::Rejected {
            message: "Database error saving new user".to_string(),
            code: None,
        });
        assert!(matches!(err, BootstrapError::ProviderConfiguration { .. }));
    }

    #[test]
    fn test_classify_ordinary_rejection() {
        let err = classify_signup_failure(ProviderError::Rejected {
            message: "User already registered".to_string(),
            code: Some("user_already_exists".to_string()),
        });
        match err {
            BootstrapError::RegistrationRejected(message) => {
                assert_eq!(message, "User already registered");
            }
            other => panic!("Expected RegistrationRejected, got {other:?}"),
        }
    }
}
