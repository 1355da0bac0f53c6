//! SQLite-backed tabular driver.
//!
//! Results are materialized eagerly into a [`SqliteCursor`] so the cursor
//! owns its rows and can outlive the connection lock.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use quarry_core::errors::{DriverError, QueryError};
use quarry_core::types::FieldValue;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};

use super::pragmas::{apply_file_pragmas, apply_pragmas};
use super::{SqliteCursor, Statement};
use crate::query::{ExecutionScope, NamedQuery};

pub(crate) fn sqlite_err(e: rusqlite::Error) -> DriverError {
    DriverError::Sqlite {
        message: e.to_string(),
    }
}

/// Owns one SQLite connection and executes query text against it.
pub struct SqliteDriver {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteDriver {
    /// Open a database at the given path and apply pragmas.
    pub fn open(path: &Path) -> Result<Self, DriverError> {
        let conn = Connection::open(path).map_err(sqlite_err)?;
        apply_file_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> Result<Self, DriverError> {
        let conn = Connection::open_in_memory().map_err(sqlite_err)?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Run `f` with the locked connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, DriverError>
    where
        F: FnOnce(&Connection) -> Result<T, DriverError>,
    {
        let guard = self.conn.lock().map_err(|_| DriverError::Sqlite {
            message: "connection lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    /// Execute one or more statements that return no rows.
    pub fn execute_batch(&self, sql: &str) -> Result<(), DriverError> {
        self.with_conn(|conn| conn.execute_batch(sql).map_err(sqlite_err))
    }

    /// Prepare `sql`, bind `params` positionally and materialize every row.
    pub fn query(
        &self,
        sql: &str,
        params: &[FieldValue],
    ) -> Result<(SqliteStatement, SqliteCursor), DriverError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql).map_err(sqlite_err)?;
            let expected = stmt.parameter_count();
            if expected != params.len() {
                return Err(DriverError::Sqlite {
                    message: format!(
                        "statement expects {expected} parameters, got {}",
                        params.len()
                    ),
                });
            }

            let columns: Vec<String> = stmt
                .column_names()
                .into_iter()
                .map(str::to_string)
                .collect();
            let bound: Vec<SqlValue> = params.iter().map(to_sql_value).collect();

            let mut rows = stmt.query(params_from_iter(bound.iter())).map_err(sqlite_err)?;
            let mut materialized = Vec::new();
            while let Some(row) = rows.next().map_err(sqlite_err)? {
                let mut values = Vec::with_capacity(columns.len());
                for idx in 0..columns.len() {
                    values.push(row.get::<_, SqlValue>(idx).map_err(sqlite_err)?);
                }
                materialized.push(values);
            }

            tracing::debug!(
                columns = columns.len(),
                rows = materialized.len(),
                "materialized query result"
            );
            Ok((
                SqliteStatement::new(sql, expected),
                SqliteCursor::new(columns, materialized),
            ))
        })
    }

    /// Execute the named query's text and attach the resulting statement and
    /// cursor to it. Any previous attachment is released first.
    pub fn run(&self, query: &mut NamedQuery, params: &[FieldValue]) -> Result<(), QueryError> {
        let sql = query.sql()?.to_string();
        let (statement, cursor) = self.query(&sql, params).map_err(|source| QueryError::Driver {
            name: query.name().to_string(),
            operation: "execute",
            source,
        })?;
        query.release_all()?;
        query.set_statement(Box::new(statement));
        query.set_cursor(Box::new(cursor));
        Ok(())
    }

    /// [`run`](Self::run), returning a guard that releases the execution on drop.
    pub fn run_scoped<'q>(
        &self,
        query: &'q mut NamedQuery,
        params: &[FieldValue],
    ) -> Result<ExecutionScope<'q>, QueryError> {
        self.run(query, params)?;
        Ok(ExecutionScope::new(query))
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn to_sql_value(value: &FieldValue) -> SqlValue {
    match value {
        FieldValue::Null => SqlValue::Null,
        FieldValue::Boolean(b) => SqlValue::Integer(i64::from(*b)),
        FieldValue::Integer(i) => SqlValue::Integer(*i),
        FieldValue::Real(r) => SqlValue::Real(*r),
        FieldValue::Text(s) => SqlValue::Text(s.clone()),
        FieldValue::Blob(bytes) => SqlValue::Blob(bytes.clone()),
        // SQLite has no array type; arrays travel as JSON text.
        FieldValue::Array(_) => SqlValue::Text(value.to_json().to_string()),
    }
}

/// The prepared-statement side of a SQLite execution.
#[derive(Debug, Clone)]
pub struct SqliteStatement {
    sql: String,
    parameter_count: usize,
    closed: bool,
}

impl SqliteStatement {
    fn new(sql: &str, parameter_count: usize) -> Self {
        Self {
            sql: sql.to_string(),
            parameter_count,
            closed: false,
        }
    }

    pub fn parameter_count(&self) -> usize {
        self.parameter_count
    }
}

impl Statement for SqliteStatement {
    fn sql(&self) -> &str {
        &self.sql
    }

    fn close(&mut self) -> Result<(), DriverError> {
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
