use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use identity_bootstrap::{CanonicalUser, ProfileUpdate, SessionBootstrap};

use super::error::ApiError;
use super::extract::BearerToken;

#[derive(Serialize)]
pub(super) struct UserBody {
    user: CanonicalUser,
}

#[derive(Serialize)]
pub(super) struct UserMessageBody {
    user: CanonicalUser,
    message: String,
}

/// `GET /auth/me` - the canonical view of the authenticated user
pub(super) async fn get_me(
    State(service): State<Arc<SessionBootstrap>>,
    BearerToken(token): BearerToken,
) -> Result<Json<UserBody>, ApiError> {
    let user = service.get_profile(&token).await?;
    Ok(Json(UserBody { user }))
}

/// `PUT /auth/me` - presence-sensitive profile edit
pub(super) async fn update_me(
    State(service): State<Arc<SessionBootstrap>>,
    BearerToken(token): BearerToken,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserMessageBody>, ApiError> {
    let user = service.update_profile(&token, update).await?;
    Ok(Json(UserMessageBody {
        user,
        message: "Profile updated successfully".to_string(),
    }))
}
