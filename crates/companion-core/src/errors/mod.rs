mod auth_error;
mod companion_error;
pub mod error_code;
mod store_error;

pub use auth_error::AuthError;
pub use companion_error::{CompanionError, CompanionResult};
pub use store_error::StoreError;
