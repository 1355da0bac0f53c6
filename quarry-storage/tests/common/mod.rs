//! Scripted driver handles for exercising failure paths without SQLite.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use quarry_core::errors::{DriverError, LoaderError};
use quarry_core::types::FieldValue;
use quarry_storage::{Cursor, ResourceLoader, Statement};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn driver_failure() -> DriverError {
    DriverError::Sqlite {
        message: "simulated driver failure".to_string(),
    }
}

/// Which operations a `ScriptedCursor` fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Failures {
    pub metadata: bool,
    pub advance: bool,
    pub extract: bool,
    pub close: bool,
}

/// A cursor over in-memory rows that can fail on demand and records closes.
pub struct ScriptedCursor {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<FieldValue>>,
    pub position: Option<usize>,
    pub failures: Failures,
    pub closed: Arc<AtomicBool>,
}

impl ScriptedCursor {
    pub fn new(columns: &[&str], rows: Vec<Vec<FieldValue>>) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
            position: None,
            failures: Failures::default(),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A cursor with `n` columns named `c1..cn` and no rows.
    pub fn with_columns(n: usize) -> Self {
        let names: Vec<String> = (1..=n).map(|i| format!("c{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        Self::new(&refs, Vec::new())
    }

    pub fn failing(mut self, failures: Failures) -> Self {
        self.failures = failures;
        self
    }

    pub fn close_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }

    fn cell(&self, ordinal: usize) -> Result<&FieldValue, DriverError> {
        if self.failures.extract {
            return Err(driver_failure());
        }
        let row = self
            .position
            .and_then(|p| self.rows.get(p))
            .ok_or(DriverError::NoCurrentRow)?;
        row.get(ordinal - 1).ok_or(DriverError::InvalidColumn {
            ordinal,
            column_count: self.columns.len(),
        })
    }
}

impl Cursor for ScriptedCursor {
    fn advance(&mut self) -> Result<bool, DriverError> {
        if self.failures.advance {
            return Err(driver_failure());
        }
        let next = self.position.map_or(0, |p| (p + 1).min(self.rows.len()));
        self.position = Some(next);
        Ok(next < self.rows.len())
    }

    fn find_column(&self, label: &str) -> Result<usize, DriverError> {
        self.columns
            .iter()
            .position(|c| c == label)
            .map(|i| i + 1)
            .ok_or_else(|| DriverError::ColumnNotFound {
                label: label.to_string(),
            })
    }

    fn column_count(&self) -> Result<usize, DriverError> {
        if self.failures.metadata {
            return Err(driver_failure());
        }
        Ok(self.columns.len())
    }

    fn get_string(&self, ordinal: usize) -> Result<Option<String>, DriverError> {
        Ok(match self.cell(ordinal)? {
            FieldValue::Null => None,
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
            other => Some(format!("{other:?}")),
        })
    }

    fn get_array(&self, ordinal: usize) -> Result<Option<Vec<FieldValue>>, DriverError> {
        Ok(match self.cell(ordinal)? {
            FieldValue::Array(items) => Some(items.clone()),
            _ => None,
        })
    }

    fn get_boolean(&self, ordinal: usize) -> Result<bool, DriverError> {
        Ok(matches!(self.cell(ordinal)?, FieldValue::Boolean(true)))
    }

    fn get_integer(&self, ordinal: usize) -> Result<i64, DriverError> {
        Ok(self.cell(ordinal)?.as_i64().unwrap_or(0))
    }

    fn get_object(&self, ordinal: usize) -> Result<FieldValue, DriverError> {
        self.cell(ordinal).cloned()
    }

    fn close(&mut self) -> Result<(), DriverError> {
        self.closed.store(true, Ordering::SeqCst);
        if self.failures.close {
            return Err(driver_failure());
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// A statement that records its close and can fail it.
pub struct ScriptedStatement {
    pub sql: String,
    pub fail_close: bool,
    pub closed: Arc<AtomicBool>,
}

impl ScriptedStatement {
    pub fn new(sql: &str) -> Self {
        Self {
            sql: sql.to_string(),
            fail_close: false,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub fn close_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }
}

impl Statement for ScriptedStatement {
    fn sql(&self) -> &str {
        &self.sql
    }

    fn close(&mut self) -> Result<(), DriverError> {
        self.closed.store(true, Ordering::SeqCst);
        if self.fail_close {
            return Err(driver_failure());
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Wraps a loader and counts how often the mapping resource is read.
pub struct CountingLoader<L> {
    pub inner: L,
    pub mapping: String,
    pub mapping_loads: AtomicUsize,
}

impl<L: ResourceLoader> CountingLoader<L> {
    pub fn new(inner: L, mapping: &str) -> Self {
        Self {
            inner,
            mapping: mapping.to_string(),
            mapping_loads: AtomicUsize::new(0),
        }
    }

    pub fn mapping_loads(&self) -> usize {
        self.mapping_loads.load(Ordering::SeqCst)
    }
}

impl<L: ResourceLoader> ResourceLoader for CountingLoader<L> {
    fn load(&self, name: &str) -> Result<String, LoaderError> {
        if name == self.mapping {
            self.mapping_loads.fetch_add(1, Ordering::SeqCst);
            // Widen the race window for concurrent first access.
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        self.inner.load(name)
    }

    fn describe(&self) -> String {
        format!("counting({})", self.inner.describe())
    }
}
