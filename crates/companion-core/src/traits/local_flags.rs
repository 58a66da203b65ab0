//! LocalFlags: visitor-local boolean flags that survive reloads
//! (the browser's local storage in the web client).

use std::sync::Arc;

use crate::errors::CompanionResult;

pub trait LocalFlags: Send + Sync {
    fn is_set(&self, key: &str) -> CompanionResult<bool>;

    fn set(&self, key: &str) -> CompanionResult<()>;

    /// Removing an absent flag is not an error.
    fn clear(&self, key: &str) -> CompanionResult<()>;
}

impl<T: LocalFlags> LocalFlags for Arc<T> {
    fn is_set(&self, key: &str) -> CompanionResult<bool> {
        (**self).is_set(key)
    }

    fn set(&self, key: &str) -> CompanionResult<()> {
        (**self).set(key)
    }

    fn clear(&self, key: &str) -> CompanionResult<()> {
        (**self).clear(key)
    }
}
