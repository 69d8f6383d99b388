//! Read-only SQLite store handle and query executor

use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, error, info};

/// One result row, columns in declaration order
pub type Row = Map<String, Value>;

/// Errors raised while querying a store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The handle failed to open at startup or has been closed
    #[error("{store} store is not open")]
    Unavailable { store: String },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// The blocking query task panicked or was cancelled
    #[error("query worker failed: {0}")]
    Worker(String),
}

/// Handle to one SQLite file, shared for the life of the process.
///
/// A handle whose file could not be opened stays in the table in an
/// unavailable state, so every query against it fails while the other
/// store keeps serving.
pub struct Store {
    name: String,
    conn: Mutex<Option<Connection>>,
}

impl Store {
    /// Open a store file read-only
    pub fn open(name: impl Into<String>, path: &Path) -> Result<Self, StoreError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)?;
        Ok(Self::from_connection(name, conn))
    }

    /// Open a store file, falling back to an unavailable handle on failure.
    ///
    /// The failure is logged here and never propagated.
    pub fn open_or_unavailable(name: impl Into<String>, path: &Path) -> Self {
        let name = name.into();
        match Self::open(name.clone(), path) {
            Ok(store) => {
                info!(store = %name, path = %path.display(), "Opened store");
                store
            }
            Err(e) => {
                error!(store = %name, path = %path.display(), error = %e, "Failed to open store");
                Self::unavailable(name)
            }
        }
    }

    /// Wrap an already-open connection (in-memory stores in tests)
    pub fn from_connection(name: impl Into<String>, conn: Connection) -> Self {
        Self {
            name: name.into(),
            conn: Mutex::new(Some(conn)),
        }
    }

    /// A handle with no connection behind it
    pub fn unavailable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conn: Mutex::new(None),
        }
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Close the connection. Later calls are no-ops.
    pub fn close(&self) {
        let Some(conn) = self.lock().take() else {
            debug!(store = %self.name, "Store already closed");
            return;
        };

        match conn.close() {
            Ok(()) => info!(store = %self.name, "Closed store"),
            // The connection is dropped here, which releases it regardless
            Err((_, e)) => error!(store = %self.name, error = %e, "Failed to close store"),
        }
    }

    /// Run one parameterized statement and return every row.
    ///
    /// The query runs on the blocking pool; the connection mutex serializes
    /// concurrent callers.
    pub async fn query(
        self: &Arc<Self>,
        sql: &'static str,
        params: Vec<String>,
    ) -> Result<Vec<Row>, StoreError> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.query_blocking(sql, &params))
            .await
            .map_err(|e| StoreError::Worker(e.to_string()))?
    }

    fn query_blocking(&self, sql: &str, params: &[String]) -> Result<Vec<Row>, StoreError> {
        let guard = self.lock();
        let conn = guard.as_ref().ok_or_else(|| StoreError::Unavailable {
            store: self.name.clone(),
        })?;

        let mut stmt = conn.prepare_cached(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                let mut out = Row::with_capacity(columns.len());
                for (i, column) in columns.iter().enumerate() {
                    out.insert(column.clone(), to_json(row.get_ref(i)?));
                }
                Ok(out)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(store = %self.name, rows = rows.len(), "Query complete");
        Ok(rows)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Connection>> {
        // Queries never leave the connection half-updated, so a poisoned
        // lock is still safe to use.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::from(bytes.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fixtures;
    use crate::storage::sql;

    #[tokio::test]
    async fn test_query_projects_columns_in_order() {
        let store = Arc::new(fixtures::plays_store());

        let rows = store
            .query(sql::PLAYS_BY_GAME, vec!["401620001".to_string()])
            .await
            .unwrap();

        assert_eq!(rows.len(), 3);
        let columns: Vec<&String> = rows[0].keys().collect();
        assert_eq!(
            columns,
            ["game_id", "game_date", "sequence_number", "period", "clock", "text", "score_value"]
        );
        assert_eq!(rows[0]["game_id"], 401620001);
        assert_eq!(rows[0]["game_date"], "2024-05-14");
    }

    #[tokio::test]
    async fn test_query_maps_sqlite_types() {
        let conn = Connection::open_in_memory().unwrap();
        let store = Arc::new(Store::from_connection("scratch", conn));

        let rows = store
            .query("SELECT NULL AS n, 7 AS i, 1.5 AS r, 'x' AS t, x'0102' AS b", vec![])
            .await
            .unwrap();

        let row = &rows[0];
        assert_eq!(row["n"], Value::Null);
        assert_eq!(row["i"], 7);
        assert_eq!(row["r"], 1.5);
        assert_eq!(row["t"], "x");
        assert_eq!(row["b"], serde_json::json!([1, 2]));
    }

    #[tokio::test]
    async fn test_params_are_bound_not_spliced() {
        let store = Arc::new(fixtures::plays_store());

        let rows = store
            .query(sql::PLAYS_BY_GAME, vec!["' OR '1'='1".to_string()])
            .await
            .unwrap();

        assert!(rows.is_empty());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let path = Path::new("/nonexistent/dir/wnba_pbp.db");
        assert!(Store::open("plays", path).is_err());

        let store = Store::open_or_unavailable("plays", path);
        assert!(!store.is_open());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_at_query_time() {
        let store = Arc::new(Store::unavailable("plays"));

        let err = store.query(sql::ALL_PLAYS, vec![]).await.unwrap_err();

        assert!(matches!(err, StoreError::Unavailable { ref store } if store == "plays"));
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let store = Arc::new(fixtures::schedule_store());
        assert!(store.is_open());

        store.close();
        assert!(!store.is_open());
        store.close();
        assert!(!store.is_open());

        let err = store.query(sql::ALL_GAMES, vec![]).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_missing_table_is_sqlite_error() {
        let conn = Connection::open_in_memory().unwrap();
        let store = Arc::new(Store::from_connection("plays", conn));

        let err = store.query(sql::ALL_PLAYS, vec![]).await.unwrap_err();

        assert!(matches!(err, StoreError::Sqlite(_)));
    }
}
