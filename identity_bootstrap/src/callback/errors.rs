use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum CallbackError {
    #[error("Token exchange failed: {0}")]
    Exchange(String),

    #[error("Failed to install provider session: {0}")]
    InstallSession(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CallbackError::Exchange("401".to_string());
        assert_eq!(err.to_string(), "Token exchange failed: 401");

        let err = CallbackError::InstallSession("expired refresh token".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to install provider session: expired refresh token"
        );
    }
}
