//! ProfileStore: the record store specialised to one UserProfile per visitor.
//!
//! Implementations: `companion_storage::StorageEngine` (file or in-memory
//! SQLite) and `companion_storage::MemoryProfileStore`.

use std::sync::Arc;

use crate::errors::CompanionResult;
use crate::models::{ProfilePatch, UserProfile};

#[allow(async_fn_in_trait)]
pub trait ProfileStore: Send + Sync {
    /// Profiles owned by the visitor, oldest first. Zero or one expected.
    async fn list_for_visitor(&self, visitor_id: &str) -> CompanionResult<Vec<UserProfile>>;

    /// Create a profile for the visitor. Unset fields take store defaults.
    async fn create(&self, visitor_id: &str, fields: ProfilePatch) -> CompanionResult<UserProfile>;

    /// Apply a partial update and return the stored record. Last write wins.
    async fn update(&self, id: &str, patch: ProfilePatch) -> CompanionResult<UserProfile>;
}

impl<T: ProfileStore> ProfileStore for Arc<T> {
    async fn list_for_visitor(&self, visitor_id: &str) -> CompanionResult<Vec<UserProfile>> {
        (**self).list_for_visitor(visitor_id).await
    }

    async fn create(&self, visitor_id: &str, fields: ProfilePatch) -> CompanionResult<UserProfile> {
        (**self).create(visitor_id, fields).await
    }

    async fn update(&self, id: &str, patch: ProfilePatch) -> CompanionResult<UserProfile> {
        (**self).update(id, patch).await
    }
}
