//! Schema versioning.
//!
//! - Version lives in a dedicated single-row `companion_schema_version` table
//! - Each version bump is a const SQL string in schema.rs

use rusqlite::Connection;
use tracing::info;

use companion_core::{CompanionResult, StoreError};

use crate::schema::COMPANION_TABLES_V1;
use crate::to_store_err;

/// Current schema version. Bump this when adding new migrations.
pub const CURRENT_VERSION: u32 = 1;

/// Read the schema version. 0 means a fresh database.
pub fn get_schema_version(conn: &Connection) -> CompanionResult<u32> {
    let exists: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='companion_schema_version'",
            [],
            |row| row.get(0),
        )
        .map_err(to_store_err)?;

    if !exists {
        return Ok(0);
    }

    match conn.query_row(
        "SELECT version FROM companion_schema_version LIMIT 1",
        [],
        |row| row.get::<_, u32>(0),
    ) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(to_store_err(e).into()),
    }
}

fn set_schema_version(conn: &Connection, version: u32) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS companion_schema_version (
            version INTEGER NOT NULL
        ) STRICT;",
    )?;
    conn.execute("DELETE FROM companion_schema_version", [])?;
    conn.execute(
        "INSERT INTO companion_schema_version (version) VALUES (?1)",
        rusqlite::params![version],
    )?;
    Ok(())
}

/// Run all pending migrations. Returns the version the database ended up at.
pub fn migrate(conn: &Connection) -> CompanionResult<u32> {
    let current = get_schema_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(current);
    }

    if current < 1 {
        info!("Migrating companion schema: 0 → 1 (profiles, local flags)");
        conn.execute_batch(COMPANION_TABLES_V1)
            .and_then(|_| set_schema_version(conn, 1))
            .map_err(|e| StoreError::MigrationFailed {
                version: 1,
                message: e.to_string(),
            })?;
    }

    let final_version = get_schema_version(conn)?;
    info!(from = current, to = final_version, "Companion schema migration complete");
    Ok(final_version)
}
