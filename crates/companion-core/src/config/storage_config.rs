use serde::{Deserialize, Serialize};

/// Local SQLite storage for profiles and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file. `None` keeps everything in memory.
    pub db_path: Option<String>,
    /// How long a connection waits on a locked database.
    pub busy_timeout_ms: u64,
    /// Serve lookups from a read-only connection. File databases only.
    pub separate_reader: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            busy_timeout_ms: 5000,
            separate_reader: true,
        }
    }
}
