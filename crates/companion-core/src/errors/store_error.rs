//! Record store errors.

use super::error_code::{self, CompanionErrorCode};

/// Errors that can occur in a profile or flag store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("Store lock poisoned")]
    LockPoisoned,

    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl CompanionErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::NotFound { .. } => error_code::RECORD_NOT_FOUND,
            Self::LockPoisoned => error_code::LOCK_POISONED,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
