//! AuthProvider: who is the current visitor, and what is their role.

use std::sync::Arc;

use crate::errors::AuthError;
use crate::models::Visitor;

#[allow(async_fn_in_trait)]
pub trait AuthProvider: Send + Sync {
    /// The current visitor, or `AuthError` when there is no session.
    async fn current_visitor(&self) -> Result<Visitor, AuthError>;

    /// Start the external login redirect flow. Nothing is consumed on return.
    async fn login(&self) -> Result<(), AuthError>;
}

impl<T: AuthProvider> AuthProvider for Arc<T> {
    async fn current_visitor(&self) -> Result<Visitor, AuthError> {
        (**self).current_visitor().await
    }

    async fn login(&self) -> Result<(), AuthError> {
        (**self).login().await
    }
}
