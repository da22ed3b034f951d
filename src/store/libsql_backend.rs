//! libSQL session store — durable backend over a local database file.
//!
//! Sessions are stored as one JSON document per row, with the columns the
//! HTTP layer filters on (subject, status) denormalized for querying.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::info;
use uuid::Uuid;

use super::traits::SessionStore;
use crate::error::StoreError;
use crate::session::Session;

/// A single migration step.
struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

/// All migrations in order. Add new versions to the end.
static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            subject_id TEXT NOT NULL,
            status TEXT NOT NULL,
            turn_count INTEGER NOT NULL DEFAULT 0,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_sessions_subject ON sessions(subject_id);
    "#,
}];

/// libSQL session store.
///
/// Holds a single connection reused for all operations;
/// `libsql::Connection` is safe for concurrent async use.
pub struct LibSqlStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlStore {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Connection(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to open database: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(format!("Failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        store.run_migrations().await?;
        info!(path = %path.display(), "Session database opened");
        Ok(store)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to create database: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(format!("Failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS _migrations (
                    version INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    applied_at TEXT NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        let mut rows = self
            .conn
            .query("SELECT COALESCE(MAX(version), 0) FROM _migrations", ())
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        let current: i64 = match rows.next().await {
            Ok(Some(row)) => row.get(0).unwrap_or(0),
            _ => 0,
        };

        for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
            self.conn
                .execute_batch(migration.sql)
                .await
                .map_err(|e| {
                    StoreError::Migration(format!("{} failed: {e}", migration.name))
                })?;
            self.conn
                .execute(
                    "INSERT INTO _migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
                    params![
                        migration.version,
                        migration.name,
                        chrono::Utc::now().to_rfc3339()
                    ],
                )
                .await
                .map_err(|e| StoreError::Migration(e.to_string()))?;
            info!(version = migration.version, name = migration.name, "Applied migration");
        }
        Ok(())
    }

    fn serialize(session: &Session) -> Result<String, StoreError> {
        serde_json::to_string(session).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for LibSqlStore {
    async fn get(&self, id: Uuid) -> Result<Option<Session>, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT data FROM sessions WHERE id = ?1",
                params![id.to_string()],
            )
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        match rows.next().await.map_err(|e| StoreError::Query(e.to_string()))? {
            Some(row) => {
                let data: String = row.get(0).map_err(|e| StoreError::Query(e.to_string()))?;
                let session = serde_json::from_str(&data)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, session: &Session) -> Result<(), StoreError> {
        let data = Self::serialize(session)?;
        self.conn
            .execute(
                "INSERT INTO sessions (id, subject_id, status, turn_count, data, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    session.id.to_string(),
                    session.subject_id.clone(),
                    session.status.to_string(),
                    session.turn_count as i64,
                    data,
                    session.created_at.to_rfc3339(),
                    session.updated_at.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(())
    }

    async fn save(&self, id: Uuid, session: &Session) -> Result<(), StoreError> {
        let data = Self::serialize(session)?;
        self.conn
            .execute(
                "UPDATE sessions SET subject_id = ?2, status = ?3, turn_count = ?4,
                 data = ?5, updated_at = ?6 WHERE id = ?1",
                params![
                    id.to_string(),
                    session.subject_id.clone(),
                    session.status.to_string(),
                    session.turn_count as i64,
                    data,
                    session.updated_at.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(())
    }
}
