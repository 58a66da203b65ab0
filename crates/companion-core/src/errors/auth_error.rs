//! Authentication provider errors.
//!
//! The gate treats every variant as "anonymous"; none of them is fatal.

use super::error_code::{self, CompanionErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("no authenticated session")]
    NotAuthenticated,

    #[error("auth provider unavailable: {reason}")]
    ProviderUnavailable { reason: String },
}

impl CompanionErrorCode for AuthError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => error_code::NOT_AUTHENTICATED,
            Self::ProviderUnavailable { .. } => error_code::AUTH_UNAVAILABLE,
        }
    }
}
