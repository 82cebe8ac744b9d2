//! Shared SQLite connection.
//!
//! Every storage operation goes through one connection behind a mutex. A
//! submission holds the guard from the author lookup to the commit, so two
//! submissions can never interleave their moderation and enforcement steps.

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Result, StorageError};
use crate::schema::run_migrations;

/// The process-wide connection, cloned into every `Database` handle.
#[derive(Clone)]
pub struct ConnectionPool {
    conn: Arc<Mutex<Connection>>,
}

impl ConnectionPool {
    /// Opens (or creates) a database file and migrates it.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::prepare(Connection::open(path)?)
    }

    /// Opens a private in-memory database, migrated and empty.
    pub fn in_memory() -> Result<Self> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> Result<Self> {
        // Comments cascade with their post, posts with their author
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Locks the connection until the returned guard is dropped.
    pub fn get(&self) -> Result<PooledConnection<'_>> {
        let guard = self.conn.lock().map_err(|_| {
            StorageError::Config("a previous storage operation panicked mid-transaction".into())
        })?;

        Ok(PooledConnection { guard })
    }
}

/// Exclusive access to the shared connection.
pub struct PooledConnection<'a> {
    guard: MutexGuard<'a, Connection>,
}

impl std::ops::Deref for PooledConnection<'_> {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}
