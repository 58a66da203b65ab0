use super::error_code::{self, CompanionErrorCode};
use super::{AuthError, StoreError};

/// Top-level error type for the application shell.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum CompanionError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown page: {path}")]
    UnknownPage { path: String },
}

impl CompanionErrorCode for CompanionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(e) => e.error_code(),
            Self::Auth(e) => e.error_code(),
            Self::Config(_) => error_code::CONFIG_ERROR,
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
            Self::UnknownPage { .. } => error_code::UNKNOWN_PAGE,
        }
    }
}

/// Convenience type alias.
pub type CompanionResult<T> = Result<T, CompanionError>;
