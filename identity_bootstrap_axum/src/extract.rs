use axum::RequestPartsExt;
use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use http::request::Parts;

use super::error::ApiError;

/// Bearer token pulled from the `Authorization` header
///
/// As a required extractor it rejects with 401 when the header is absent
/// or malformed; the optional form yields `None` instead, letting the
/// token-exchange endpoint fall back to a body-supplied token.
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(authorization) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                tracing::debug!("Missing or malformed Authorization header");
                ApiError::unauthorized()
            })?;

        Ok(BearerToken(authorization.token().to_string()))
    }
}

impl<S> OptionalFromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let header = parts
            .extract::<Option<TypedHeader<Authorization<Bearer>>>>()
            .await
            .unwrap_or(None);

        Ok(header.map(|TypedHeader(authorization)| BearerToken(authorization.token().to_string())))
    }
}
