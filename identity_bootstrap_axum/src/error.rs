use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

use identity_bootstrap::BootstrapError;

/// JSON error surface of the auth endpoints
///
/// The `error` string is what clients display verbatim; `details` and
/// `code` only accompany provider configuration defects.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ApiError {
    fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                details: None,
                code: None,
            },
        }
    }

    /// 400 with the given message
    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 401 for an absent or unusable Authorization header
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<BootstrapError> for ApiError {
    fn from(err: BootstrapError) -> Self {
        let status = match &err {
            BootstrapError::MissingCredential(_) | BootstrapError::WeakPassword => {
                StatusCode::BAD_REQUEST
            }
            BootstrapError::InvalidToken | BootstrapError::InvalidCredentials(_) => {
                StatusCode::UNAUTHORIZED
            }
            BootstrapError::RegistrationRejected(_) => StatusCode::BAD_REQUEST,
            BootstrapError::ProviderConfiguration { .. }
            | BootstrapError::ProfileStore(_)
            | BootstrapError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let (details, code) = match err {
            BootstrapError::ProviderConfiguration {
                ref details,
                ref code,
                ..
            } => (Some(details.clone()), code.clone()),
            _ => (None, None),
        };

        Self {
            status,
            body: ErrorBody {
                error: err.to_string(),
                details,
                code,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
