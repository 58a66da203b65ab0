//! Collaborator traits. The shell only talks to the outside world through these.

pub mod auth_provider;
pub mod local_flags;
pub mod profile_store;
pub mod router;

pub use auth_provider::AuthProvider;
pub use local_flags::LocalFlags;
pub use profile_store::ProfileStore;
pub use router::Router;
