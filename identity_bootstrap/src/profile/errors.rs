use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ProfileError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Profile not found: {0}")]
    NotFound(String),
}
