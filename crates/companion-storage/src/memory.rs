//! In-memory `ProfileStore` and `LocalFlags` for ephemeral sessions and tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use companion_core::{
    CompanionResult, LocalFlags, ProfilePatch, ProfileStore, StoreError, UserProfile,
};

/// Profiles kept in insertion order.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<Vec<UserProfile>>,
    creates: AtomicUsize,
    updates: AtomicUsize,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records.
    pub fn with_profiles(profiles: Vec<UserProfile>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
            ..Self::default()
        }
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> CompanionResult<Vec<UserProfile>> {
        Ok(self
            .profiles
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?
            .clone())
    }
}

impl ProfileStore for MemoryProfileStore {
    async fn list_for_visitor(&self, visitor_id: &str) -> CompanionResult<Vec<UserProfile>> {
        let profiles = self.profiles.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(profiles
            .iter()
            .filter(|p| p.visitor_id == visitor_id)
            .cloned()
            .collect())
    }

    async fn create(&self, visitor_id: &str, fields: ProfilePatch) -> CompanionResult<UserProfile> {
        let mut profile = UserProfile::with_defaults(uuid::Uuid::new_v4().to_string(), visitor_id);
        profile.apply(&fields);

        self.profiles
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?
            .push(profile.clone());
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(profile)
    }

    async fn update(&self, id: &str, patch: ProfilePatch) -> CompanionResult<UserProfile> {
        let mut profiles = self.profiles.lock().map_err(|_| StoreError::LockPoisoned)?;
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "UserProfile".to_string(),
                id: id.to_string(),
            })?;
        profile.apply(&patch);
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(profile.clone())
    }
}

#[derive(Default)]
pub struct MemoryLocalFlags {
    flags: Mutex<HashSet<String>>,
}

impl MemoryLocalFlags {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalFlags for MemoryLocalFlags {
    fn is_set(&self, key: &str) -> CompanionResult<bool> {
        Ok(self
            .flags
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?
            .contains(key))
    }

    fn set(&self, key: &str) -> CompanionResult<()> {
        self.flags
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(key.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> CompanionResult<()> {
        self.flags
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_unknown_profile_is_not_found() {
        let store = MemoryProfileStore::new();
        let err = store
            .update("missing", ProfilePatch::acknowledge_disclaimer())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing"));
        assert_eq!(store.update_count(), 0);
    }

    #[tokio::test]
    async fn list_filters_by_visitor() {
        let store = MemoryProfileStore::new();
        store.create("alice", ProfilePatch::default()).await.unwrap();
        store.create("bob", ProfilePatch::default()).await.unwrap();

        let profiles = store.list_for_visitor("alice").await.unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].visitor_id, "alice");
        assert_eq!(store.create_count(), 2);
    }

    #[test]
    fn flags_set_and_clear() {
        let flags = MemoryLocalFlags::new();
        assert!(!flags.is_set("disclaimer_agreed").unwrap());
        flags.set("disclaimer_agreed").unwrap();
        assert!(flags.is_set("disclaimer_agreed").unwrap());
        flags.clear("disclaimer_agreed").unwrap();
        flags.clear("disclaimer_agreed").unwrap();
        assert!(!flags.is_set("disclaimer_agreed").unwrap());
    }
}
