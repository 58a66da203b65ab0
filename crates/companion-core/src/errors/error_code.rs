//! Stable error codes attached to every error for structured logging.

pub const NOT_AUTHENTICATED: &str = "NOT_AUTHENTICATED";
pub const AUTH_UNAVAILABLE: &str = "AUTH_UNAVAILABLE";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const RECORD_NOT_FOUND: &str = "RECORD_NOT_FOUND";
pub const LOCK_POISONED: &str = "LOCK_POISONED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const UNKNOWN_PAGE: &str = "UNKNOWN_PAGE";

/// Implemented by every error type in the workspace.
pub trait CompanionErrorCode {
    fn error_code(&self) -> &'static str;
}
