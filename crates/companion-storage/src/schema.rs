//! Schema SQL constants used by migrations.rs.

/// V1 schema: profiles + local flags.
pub const COMPANION_TABLES_V1: &str = "
    CREATE TABLE IF NOT EXISTS user_profiles (
        id TEXT PRIMARY KEY NOT NULL,
        visitor_id TEXT NOT NULL,
        has_acknowledged_disclaimer INTEGER NOT NULL DEFAULT 0,
        subscription_status TEXT,
        trial_start_date TEXT,
        created_at INTEGER NOT NULL DEFAULT (unixepoch()),
        updated_at INTEGER NOT NULL DEFAULT (unixepoch())
    ) STRICT;

    CREATE TABLE IF NOT EXISTS local_flags (
        key TEXT PRIMARY KEY NOT NULL,
        value INTEGER NOT NULL DEFAULT 1,
        updated_at INTEGER NOT NULL DEFAULT (unixepoch())
    ) STRICT;

    CREATE INDEX IF NOT EXISTS idx_user_profiles_visitor ON user_profiles(visitor_id);
";

pub const COMPANION_TABLE_NAMES: [&str; 2] = ["user_profiles", "local_flags"];
