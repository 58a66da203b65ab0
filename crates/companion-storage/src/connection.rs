//! Connections for the profile and flag store.
//!
//! A file database gets a WAL writer and, unless disabled, one read-only
//! connection for lookups so a gate check never queues behind a disclaimer
//! write. An in-memory database cannot be shared between connections, so
//! there everything goes through the writer.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use companion_core::config::StorageConfig;
use companion_core::{CompanionResult, StoreError};

use crate::to_store_err;

pub struct Connections {
    writer: Mutex<Connection>,
    reader: Option<Mutex<Connection>>,
}

impl Connections {
    pub fn open(path: &Path, config: &StorageConfig) -> CompanionResult<Self> {
        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);

        let writer = Connection::open(path).map_err(|e| StoreError::Unavailable {
            reason: format!("cannot open {}: {e}", path.display()),
        })?;
        writer.busy_timeout(busy_timeout).map_err(to_store_err)?;
        let journal: String = writer
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(to_store_err)?;
        // WAL makes NORMAL durable enough for a flag and one profile row.
        writer
            .pragma_update(None, "synchronous", "NORMAL")
            .map_err(to_store_err)?;
        debug!(path = %path.display(), journal = %journal, "Writer connection ready");

        let reader = if config.separate_reader {
            // The read-only open flag is enough; no query_only pragma needed.
            let reader = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| StoreError::Unavailable {
                reason: format!("cannot open reader on {}: {e}", path.display()),
            })?;
            reader.busy_timeout(busy_timeout).map_err(to_store_err)?;
            Some(Mutex::new(reader))
        } else {
            None
        };

        Ok(Self {
            writer: Mutex::new(writer),
            reader,
        })
    }

    pub fn open_in_memory() -> CompanionResult<Self> {
        let writer = Connection::open_in_memory().map_err(to_store_err)?;
        Ok(Self {
            writer: Mutex::new(writer),
            reader: None,
        })
    }

    pub fn write<F, T>(&self, f: F) -> CompanionResult<T>
    where
        F: FnOnce(&Connection) -> CompanionResult<T>,
    {
        let conn = self.writer.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&conn)
    }

    /// Runs on the reader when there is one, else on the writer.
    pub fn read<F, T>(&self, f: F) -> CompanionResult<T>
    where
        F: FnOnce(&Connection) -> CompanionResult<T>,
    {
        match &self.reader {
            Some(reader) => {
                let conn = reader.lock().map_err(|_| StoreError::LockPoisoned)?;
                f(&conn)
            }
            None => self.write(f),
        }
    }

    pub fn has_reader(&self) -> bool {
        self.reader.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_connections(config: &StorageConfig) -> (tempfile::TempDir, Connections) {
        let dir = tempfile::tempdir().unwrap();
        let conns = Connections::open(&dir.path().join("flags.db"), config).unwrap();
        conns
            .write(|c| {
                c.execute_batch("CREATE TABLE t (x INTEGER)").map_err(to_store_err)?;
                Ok(())
            })
            .unwrap();
        (dir, conns)
    }

    #[test]
    fn file_writer_uses_wal_and_configured_timeout() {
        let config = StorageConfig {
            busy_timeout_ms: 750,
            ..StorageConfig::default()
        };
        let (_dir, conns) = file_connections(&config);
        let (journal, timeout) = conns
            .write(|c| {
                let journal: String = c
                    .pragma_query_value(None, "journal_mode", |row| row.get(0))
                    .map_err(to_store_err)?;
                let timeout: i64 = c
                    .pragma_query_value(None, "busy_timeout", |row| row.get(0))
                    .map_err(to_store_err)?;
                Ok((journal, timeout))
            })
            .unwrap();
        assert_eq!(journal.to_lowercase(), "wal");
        assert_eq!(timeout, 750);
    }

    #[test]
    fn reader_sees_writes_but_cannot_write() {
        let (_dir, conns) = file_connections(&StorageConfig::default());
        assert!(conns.has_reader());
        conns
            .write(|c| {
                c.execute("INSERT INTO t (x) VALUES (7)", []).map_err(to_store_err)?;
                Ok(())
            })
            .unwrap();

        let x: i64 = conns
            .read(|c| c.query_row("SELECT x FROM t", [], |r| r.get(0)).map_err(|e| to_store_err(e).into()))
            .unwrap();
        assert_eq!(x, 7);
        let denied = conns.read(|c| {
            c.execute("INSERT INTO t (x) VALUES (8)", []).map_err(to_store_err)?;
            Ok(())
        });
        assert!(denied.is_err());
    }

    #[test]
    fn without_separate_reader_reads_use_the_writer() {
        let config = StorageConfig {
            separate_reader: false,
            ..StorageConfig::default()
        };
        let (_dir, conns) = file_connections(&config);
        assert!(!conns.has_reader());
        assert!(Connections::open_in_memory().map(|c| !c.has_reader()).unwrap());
    }
}
