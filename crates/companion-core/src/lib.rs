//! # companion-core
//!
//! Foundation crate for the Infinity Companion application shell.
//! Defines the page catalogue, visitor and profile models, collaborator traits,
//! errors, config and tracing setup. Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod streak;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CompanionConfig;
pub use errors::error_code::CompanionErrorCode;
pub use errors::{AuthError, CompanionError, CompanionResult, StoreError};
pub use models::{PageId, ProfilePatch, Role, SubscriptionStatus, UserProfile, Visitor};
pub use traits::{AuthProvider, LocalFlags, ProfileStore, Router};
