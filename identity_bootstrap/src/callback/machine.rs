use async_trait::async_trait;

use super::errors::CallbackError;
use super::types::{
    CallbackOutcome, CallbackRequest, CallbackState, ERROR_REDIRECT_DELAY, ExchangedSession,
    RedirectTarget, SUCCESS_REDIRECT_DELAY,
};

/// Capabilities the reconciler needs from its host
///
/// On the web client these map to the backend token-exchange call, the
/// provider SDK's session management, and local storage.
#[async_trait]
pub trait CallbackEnv: Send + Sync {
    /// Exchange a provider bearer token for a canonical session
    async fn exchange_token(&self, access_token: &str)
    -> Result<ExchangedSession, CallbackError>;

    /// Install an access/refresh token pair as the active provider session
    async fn install_session(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), CallbackError>;

    /// Bearer token of the already-active provider session, if any
    async fn active_session_token(&self) -> Option<String>;

    /// Persist the established session client-side
    async fn persist_session(&self, session_token: &str, email: &str);
}

/// State machine for the email-confirmation redirect flow
///
/// Starts in `Loading` and tries token sources in strict priority order,
/// short-circuiting on the first success. Sources run strictly
/// sequentially; nothing is raced, so a failure is always attributable to
/// one source.
pub struct CallbackReconciler<'e> {
    env: &'e dyn CallbackEnv,
    state: CallbackState,
}

impl<'e> CallbackReconciler<'e> {
    pub fn new(env: &'e dyn CallbackEnv) -> Self {
        Self {
            env,
            state: CallbackState::Loading,
        }
    }

    pub fn state(&self) -> CallbackState {
        self.state
    }

    /// Drive the flow to a terminal state.
    ///
    /// Source priority:
    /// 1. fragment bearer token, when the redirect is signup-typed
    /// 2. fragment access+refresh pair installed as the active session,
    ///    then the re-derived bearer token
    /// 3. an already-active provider session
    /// 4. exhausted: `Error`, pointing the user at manual sign-in
    pub async fn run(&mut self, request: &CallbackRequest) -> CallbackOutcome {
        if request.is_signup_confirmation() {
            // Source 1: token straight from the fragment
            if let Some(token) = &request.access_token {
                match self.env.exchange_token(token).await {
                    Ok(session) => return self.succeed(session).await,
                    Err(e) => {
                        tracing::debug!(error = %e, "Fragment token exchange failed");
                    }
                }
            }

            // Source 2: install the token pair, then re-derive the bearer
            if let (Some(access), Some(refresh)) =
                (&request.access_token, &request.refresh_token)
            {
                match self.env.install_session(access, refresh).await {
                    Ok(()) => {
                        if let Some(bearer) = self.env.active_session_token().await {
                            match self.env.exchange_token(&bearer).await {
                                Ok(session) => return self.succeed(session).await,
                                Err(e) => {
                                    tracing::debug!(error = %e, "Installed-session exchange failed");
                                }
                            }
                        }
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "Session install failed");
                    }
                }
            }
        }

        // Source 3: the browser may already hold a provider session
        if let Some(bearer) = self.env.active_session_token().await {
            match self.env.exchange_token(&bearer).await {
                Ok(session) => return self.succeed(session).await,
                Err(e) => {
                    tracing::debug!(error = %e, "Active-session exchange failed");
                }
            }
        }

        self.fail()
    }

    async fn succeed(&mut self, session: ExchangedSession) -> CallbackOutcome {
        self.env
            .persist_session(&session.session_token, &session.email)
            .await;
        self.state = CallbackState::Success;
        CallbackOutcome {
            state: CallbackState::Success,
            message: "Email verified successfully! Redirecting...".to_string(),
            redirect: RedirectTarget::Dashboard,
            delay: SUCCESS_REDIRECT_DELAY,
        }
    }

    fn fail(&mut self) -> CallbackOutcome {
        self.state = CallbackState::Error;
        CallbackOutcome {
            state: CallbackState::Error,
            message: "Failed to verify email. Please try signing in.".to_string(),
            redirect: RedirectTarget::SignIn,
            delay: ERROR_REDIRECT_DELAY,
        }
    }
}
