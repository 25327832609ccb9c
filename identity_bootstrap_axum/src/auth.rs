use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use serde::{Deserialize, Serialize};

use identity_bootstrap::{CanonicalUser, RegisterOutcome, SessionBootstrap};

use super::error::ApiError;
use super::extract::BearerToken;

/// Body form of `POST /auth/token`, used when no Authorization header is sent
#[derive(Deserialize)]
pub(super) struct TokenExchangeRequest {
    access_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TokenExchangeBody {
    access_token: String,
    user: CanonicalUser,
}

/// Validate a provider access token and return the canonical session payload
pub(super) async fn token_exchange(
    State(service): State<Arc<SessionBootstrap>>,
    bearer: Option<BearerToken>,
    body: Option<Json<TokenExchangeRequest>>,
) -> Result<Json<TokenExchangeBody>, ApiError> {
    let token = bearer
        .map(|BearerToken(token)| token)
        .or_else(|| body.and_then(|Json(body)| body.access_token));

    let Some(token) = token else {
        return Err(ApiError::missing_credential("Missing access token"));
    };

    let response = service.token_exchange(&token).await?;

    Ok(Json(TokenExchangeBody {
        access_token: response.session_token,
        user: response.user,
    }))
}

#[derive(Deserialize)]
pub(super) struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LoginBody {
    message: String,
    token: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
}

pub(super) async fn login(
    State(service): State<Arc<SessionBootstrap>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginBody>, ApiError> {
    let response = service.login(&request.email, &request.password).await?;

    Ok(Json(LoginBody {
        message: "Login successful".to_string(),
        token: response.session_token,
        email: response.email,
        first_name: response.first_name,
        last_name: response.last_name,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RegisterRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RegisterBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    requires_email_verification: Option<bool>,
}

pub(super) async fn register(
    State(service): State<Arc<SessionBootstrap>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterBody>), ApiError> {
    let outcome = service
        .register(
            &request.email,
            &request.password,
            request.first_name,
            request.last_name,
        )
        .await?;

    let body = match outcome {
        RegisterOutcome::Active {
            session_token,
            email,
        } => RegisterBody {
            message: "Account created successfully".to_string(),
            token: Some(session_token),
            email,
            requires_email_verification: None,
        },
        RegisterOutcome::PendingVerification { email } => RegisterBody {
            message: "Account created. Please check your email to verify your account."
                .to_string(),
            token: None,
            email,
            requires_email_verification: Some(true),
        },
    };

    Ok((StatusCode::CREATED, Json(body)))
}
