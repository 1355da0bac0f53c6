//! Materialized SQLite result cursor with JDBC-style typed getters.

use quarry_core::errors::DriverError;
use quarry_core::types::{FieldValue, TypeTag};
use rusqlite::types::Value as SqlValue;

use super::Cursor;

/// A cursor over rows that were fully read at execution time.
#[derive(Debug, Clone)]
pub struct SqliteCursor {
    columns: Vec<String>,
    rows: Vec<Vec<SqlValue>>,
    /// `None` before the first `advance`; `Some(rows.len())` once exhausted.
    position: Option<usize>,
    closed: bool,
}

impl SqliteCursor {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self {
            columns,
            rows,
            position: None,
            closed: false,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn ensure_open(&self) -> Result<(), DriverError> {
        if self.closed {
            return Err(DriverError::Closed { handle: "cursor" });
        }
        Ok(())
    }

    fn cell(&self, ordinal: usize) -> Result<&SqlValue, DriverError> {
        self.ensure_open()?;
        if ordinal == 0 || ordinal > self.columns.len() {
            return Err(DriverError::InvalidColumn {
                ordinal,
                column_count: self.columns.len(),
            });
        }
        let row = self
            .position
            .and_then(|p| self.rows.get(p))
            .ok_or(DriverError::NoCurrentRow)?;
        Ok(&row[ordinal - 1])
    }
}

fn mismatch(ordinal: usize, expected: TypeTag, found: &SqlValue) -> DriverError {
    DriverError::TypeMismatch {
        ordinal,
        expected,
        found: format!("{:?}", found.data_type()).to_lowercase(),
    }
}

/// Truncate toward zero. `None` for NaN, infinities and values outside `i64`.
fn real_to_i64(r: f64) -> Option<i64> {
    // i64::MAX rounds up to 2^63 as f64, so the upper bound is exclusive.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let t = r.trunc();
    (t.is_finite() && (-LIMIT..LIMIT).contains(&t)).then_some(t as i64)
}

impl Cursor for SqliteCursor {
    fn advance(&mut self) -> Result<bool, DriverError> {
        self.ensure_open()?;
        let next = self.position.map_or(0, |p| (p + 1).min(self.rows.len()));
        self.position = Some(next);
        Ok(next < self.rows.len())
    }

    fn find_column(&self, label: &str) -> Result<usize, DriverError> {
        self.ensure_open()?;
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(label))
            .map(|idx| idx + 1)
            .ok_or_else(|| DriverError::ColumnNotFound {
                label: label.to_string(),
            })
    }

    fn column_count(&self) -> Result<usize, DriverError> {
        self.ensure_open()?;
        Ok(self.columns.len())
    }

    fn get_string(&self, ordinal: usize) -> Result<Option<String>, DriverError> {
        Ok(match self.cell(ordinal)? {
            SqlValue::Null => None,
            SqlValue::Integer(i) => Some(i.to_string()),
            SqlValue::Real(r) => Some(r.to_string()),
            SqlValue::Text(s) => Some(s.clone()),
            SqlValue::Blob(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        })
    }

    fn get_array(&self, ordinal: usize) -> Result<Option<Vec<FieldValue>>, DriverError> {
        let cell = self.cell(ordinal)?;
        match cell {
            SqlValue::Null => Ok(None),
            SqlValue::Text(s) => match serde_json::from_str::<serde_json::Value>(s) {
                Ok(serde_json::Value::Array(items)) => {
                    Ok(Some(items.into_iter().map(FieldValue::from).collect()))
                }
                _ => Err(mismatch(ordinal, TypeTag::Array, cell)),
            },
            other => Err(mismatch(ordinal, TypeTag::Array, other)),
        }
    }

    fn get_boolean(&self, ordinal: usize) -> Result<bool, DriverError> {
        let cell = self.cell(ordinal)?;
        match cell {
            SqlValue::Null => Ok(false),
            SqlValue::Integer(i) => Ok(*i != 0),
            SqlValue::Real(r) => Ok(*r != 0.0),
            SqlValue::Text(s) => match s.trim() {
                "1" => Ok(true),
                "0" => Ok(false),
                t if t.eq_ignore_ascii_case("true") => Ok(true),
                t if t.eq_ignore_ascii_case("false") => Ok(false),
                _ => Err(mismatch(ordinal, TypeTag::Boolean, cell)),
            },
            SqlValue::Blob(_) => Err(mismatch(ordinal, TypeTag::Boolean, cell)),
        }
    }

    fn get_integer(&self, ordinal: usize) -> Result<i64, DriverError> {
        let cell = self.cell(ordinal)?;
        match cell {
            SqlValue::Null => Ok(0),
            SqlValue::Integer(i) => Ok(*i),
            SqlValue::Real(r) => {
                real_to_i64(*r).ok_or_else(|| mismatch(ordinal, TypeTag::Integer, cell))
            }
            SqlValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| mismatch(ordinal, TypeTag::Integer, cell)),
            SqlValue::Blob(_) => Err(mismatch(ordinal, TypeTag::Integer, cell)),
        }
    }

    fn get_object(&self, ordinal: usize) -> Result<FieldValue, DriverError> {
        Ok(match self.cell(ordinal)? {
            SqlValue::Null => FieldValue::Null,
            SqlValue::Integer(i) => FieldValue::Integer(*i),
            SqlValue::Real(r) => FieldValue::Real(*r),
            SqlValue::Text(s) => FieldValue::Text(s.clone()),
            SqlValue::Blob(bytes) => FieldValue::Blob(bytes.clone()),
        })
    }

    fn close(&mut self) -> Result<(), DriverError> {
        self.closed = true;
        self.rows.clear();
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
