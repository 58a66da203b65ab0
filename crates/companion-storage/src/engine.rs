//! StorageEngine: SQLite-backed `ProfileStore` and `LocalFlags`.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use companion_core::config::StorageConfig;
use companion_core::{
    CompanionResult, LocalFlags, ProfilePatch, ProfileStore, StoreError, SubscriptionStatus,
    UserProfile,
};

use crate::connection::Connections;
use crate::{migrations, to_store_err};

const PROFILE_COLUMNS: &str =
    "id, visitor_id, has_acknowledged_disclaimer, subscription_status, trial_start_date";

pub struct StorageEngine {
    conns: Connections,
}

impl StorageEngine {
    /// Open (or create) a database file with default settings.
    pub fn open(path: &Path) -> CompanionResult<Self> {
        Self::open_with(path, &StorageConfig::default())
    }

    pub fn open_in_memory() -> CompanionResult<Self> {
        Self::migrated(Connections::open_in_memory()?)
    }

    pub fn from_config(config: &StorageConfig) -> CompanionResult<Self> {
        match config.db_path.as_deref() {
            Some(path) => Self::open_with(Path::new(path), config),
            None => Self::open_in_memory(),
        }
    }

    fn open_with(path: &Path, config: &StorageConfig) -> CompanionResult<Self> {
        let engine = Self::migrated(Connections::open(path, config)?)?;
        info!(
            path = %path.display(),
            separate_reader = engine.conns.has_reader(),
            "Storage opened"
        );
        Ok(engine)
    }

    fn migrated(conns: Connections) -> CompanionResult<Self> {
        conns.write(|conn| migrations::migrate(conn).map(|_| ()))?;
        Ok(Self { conns })
    }

    /// Run raw SQL on the writer. Test and maintenance use only.
    pub fn execute<P: rusqlite::Params>(&self, sql: &str, params: P) -> CompanionResult<usize> {
        self.conns
            .write(|conn| conn.execute(sql, params).map_err(|e| to_store_err(e).into()))
    }

    pub fn profile_count(&self) -> CompanionResult<u64> {
        self.conns.read(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM user_profiles", [], |row| row.get(0))
                .map_err(to_store_err)?;
            Ok(count as u64)
        })
    }
}

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<UserProfile> {
    let status: Option<String> = row.get(3)?;
    let trial: Option<String> = row.get(4)?;
    let trial_start_date = trial
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        4,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })
        })
        .transpose()?;

    Ok(UserProfile {
        id: row.get(0)?,
        visitor_id: row.get(1)?,
        has_acknowledged_disclaimer: row.get::<_, i64>(2)? != 0,
        subscription_status: status.map(SubscriptionStatus::from),
        trial_start_date,
    })
}

fn load_profile(conn: &Connection, id: &str) -> CompanionResult<UserProfile> {
    conn.query_row(
        &format!("SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE id = ?1"),
        params![id],
        profile_from_row,
    )
    .optional()
    .map_err(to_store_err)?
    .ok_or_else(|| {
        StoreError::NotFound {
            entity: "UserProfile".to_string(),
            id: id.to_string(),
        }
        .into()
    })
}

impl ProfileStore for StorageEngine {
    async fn list_for_visitor(&self, visitor_id: &str) -> CompanionResult<Vec<UserProfile>> {
        self.conns.read(|conn| {
            let mut stmt = conn
                .prepare_cached(&format!(
                    "SELECT {PROFILE_COLUMNS} FROM user_profiles \
                     WHERE visitor_id = ?1 ORDER BY created_at ASC, rowid ASC"
                ))
                .map_err(to_store_err)?;
            let rows = stmt
                .query_map(params![visitor_id], profile_from_row)
                .map_err(to_store_err)?;
            let profiles = rows
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(to_store_err)?;
            Ok(profiles)
        })
    }

    async fn create(&self, visitor_id: &str, fields: ProfilePatch) -> CompanionResult<UserProfile> {
        let mut profile = UserProfile::with_defaults(uuid::Uuid::new_v4().to_string(), visitor_id);
        profile.apply(&fields);

        self.conns.write(|conn| {
            conn.execute(
                "INSERT INTO user_profiles \
                 (id, visitor_id, has_acknowledged_disclaimer, subscription_status, trial_start_date) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    profile.id,
                    profile.visitor_id,
                    profile.has_acknowledged_disclaimer,
                    profile.subscription_status.as_ref().map(|s| s.as_str().to_string()),
                    profile.trial_start_date.map(|d| d.to_rfc3339()),
                ],
            )
            .map_err(to_store_err)?;
            Ok(())
        })?;

        debug!(profile = %profile.id, visitor = visitor_id, "Profile created");
        Ok(profile)
    }

    async fn update(&self, id: &str, patch: ProfilePatch) -> CompanionResult<UserProfile> {
        self.conns.write(|conn| {
            let mut profile = load_profile(conn, id)?;
            if patch.is_empty() {
                return Ok(profile);
            }
            profile.apply(&patch);
            conn.execute(
                "UPDATE user_profiles SET has_acknowledged_disclaimer = ?2, \
                 subscription_status = ?3, trial_start_date = ?4, updated_at = unixepoch() \
                 WHERE id = ?1",
                params![
                    profile.id,
                    profile.has_acknowledged_disclaimer,
                    profile.subscription_status.as_ref().map(|s| s.as_str().to_string()),
                    profile.trial_start_date.map(|d| d.to_rfc3339()),
                ],
            )
            .map_err(to_store_err)?;
            Ok(profile)
        })
    }
}

impl LocalFlags for StorageEngine {
    fn is_set(&self, key: &str) -> CompanionResult<bool> {
        self.conns.read(|conn| {
            conn.query_row(
                "SELECT value FROM local_flags WHERE key = ?1",
                params![key],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .map(|value| value.is_some_and(|v| v != 0))
            .map_err(|e| to_store_err(e).into())
        })
    }

    fn set(&self, key: &str) -> CompanionResult<()> {
        self.conns.write(|conn| {
            conn.execute(
                "INSERT INTO local_flags (key, value) VALUES (?1, 1) \
                 ON CONFLICT(key) DO UPDATE SET value = 1, updated_at = unixepoch()",
                params![key],
            )
            .map_err(to_store_err)?;
            Ok(())
        })
    }

    fn clear(&self, key: &str) -> CompanionResult<()> {
        self.conns.write(|conn| {
            conn.execute("DELETE FROM local_flags WHERE key = ?1", params![key])
                .map_err(to_store_err)?;
            Ok(())
        })
    }
}
