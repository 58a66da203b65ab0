//! # companion-storage
//!
//! Local persistence for the application shell: visitor profiles and
//! visitor-local flags.
//!
//! - `engine`: `StorageEngine`, SQLite-backed `ProfileStore` + `LocalFlags`
//! - `memory`: in-memory implementations of both traits
//! - `connection`: WAL writer plus an optional read-only connection
//! - `schema`, `migrations`: versioned schema

pub mod connection;
pub mod engine;
pub mod memory;
pub mod migrations;
pub mod schema;

pub use engine::StorageEngine;
pub use memory::{MemoryLocalFlags, MemoryProfileStore};

use companion_core::StoreError;

/// Map a rusqlite error into the store error type.
pub fn to_store_err(e: rusqlite::Error) -> StoreError {
    StoreError::Sqlite {
        message: e.to_string(),
    }
}
