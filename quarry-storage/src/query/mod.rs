//! NamedQuery: one stored SQL text plus the statement and cursor of its
//! current execution.

pub mod scope;

use std::fmt;

use quarry_core::constants::{FIRST_COLUMN, UNKNOWN_COLUMN_COUNT};
use quarry_core::errors::{DriverError, QueryError};
use quarry_core::types::{FieldRef, FieldValue, Strictness, TypeTag, TypedValue};

use crate::driver::{Cursor, Statement};

pub use scope::ExecutionScope;

/// A stored SQL template with at most one attached execution result.
///
/// The text never changes after construction. The statement and cursor are
/// attached and replaced by the consumer; `column_count` always reflects the
/// cursor attached right now, or `-1` when there is none.
///
/// There is no internal locking: one consumer drives a query at a time.
pub struct NamedQuery {
    name: String,
    text: Option<String>,
    statement: Option<Box<dyn Statement>>,
    cursor: Option<Box<dyn Cursor>>,
    column_count: i64,
    strictness: Strictness,
}

impl NamedQuery {
    /// `text` is `None` when the query's resource could not be read.
    pub fn new(name: impl Into<String>, text: Option<String>) -> Self {
        Self {
            name: name.into(),
            text,
            statement: None,
            cursor: None,
            column_count: UNKNOWN_COLUMN_COUNT,
            strictness: Strictness::default(),
        }
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The SQL text exactly as loaded, if it loaded.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The SQL text, or `MissingText` if the resource failed to load.
    pub fn sql(&self) -> Result<&str, QueryError> {
        self.text().ok_or_else(|| QueryError::MissingText {
            name: self.name.clone(),
        })
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    pub fn has_cursor(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn has_statement(&self) -> bool {
        self.statement.is_some()
    }

    /// Column count of the attached cursor; `-1` means no field is readable.
    pub fn column_count(&self) -> i64 {
        self.column_count
    }

    /// Install a statement. The previous one is handed back unreleased.
    pub fn set_statement(&mut self, statement: Box<dyn Statement>) -> Option<Box<dyn Statement>> {
        let previous = self.statement.replace(statement);
        if previous.as_ref().is_some_and(|s| !s.is_closed()) {
            tracing::debug!(query = %self.name, "replaced a statement that was not released");
        }
        previous
    }

    /// Install a cursor and recompute `column_count` from its metadata.
    /// The previous cursor is handed back unreleased.
    pub fn set_cursor(&mut self, cursor: Box<dyn Cursor>) -> Option<Box<dyn Cursor>> {
        self.column_count = match cursor.column_count() {
            Ok(count) => i64::try_from(count).unwrap_or(UNKNOWN_COLUMN_COUNT),
            Err(e) => {
                tracing::warn!(query = %self.name, error = %e, "cursor metadata unavailable");
                UNKNOWN_COLUMN_COUNT
            }
        };
        tracing::debug!(query = %self.name, columns = self.column_count, "attached cursor");

        let previous = self.cursor.replace(cursor);
        if previous.as_ref().is_some_and(|c| !c.is_closed()) {
            tracing::debug!(query = %self.name, "replaced a cursor that was not released");
        }
        previous
    }

    /// Move the cursor to the next row.
    ///
    /// Returns `Ok(false)` when there is no cursor or no further row. A driver
    /// failure also reads as `Ok(false)` unless the query is strict.
    pub fn advance(&mut self) -> Result<bool, QueryError> {
        let Some(cursor) = self.cursor.as_mut() else {
            tracing::debug!(query = %self.name, "advance without an attached cursor");
            return Ok(false);
        };
        match cursor.advance() {
            Ok(has_row) => Ok(has_row),
            Err(e) => self.degrade("advance", e, false),
        }
    }

    /// Read one field of the current row as `tag`.
    ///
    /// Unresolvable labels and ordinals outside `1..=column_count` fail with a
    /// bounds violation. `Ok(None)` means extraction failed in lenient mode;
    /// SQL NULL comes back as `Some(FieldValue::Null)`.
    pub fn field(
        &self,
        field: impl Into<FieldRef>,
        tag: TypeTag,
    ) -> Result<Option<FieldValue>, QueryError> {
        let field = field.into();
        let ordinal = self.resolve(&field)?;
        let ordinal = self.check_bounds(ordinal)?;

        let Some(cursor) = self.cursor.as_deref() else {
            // Unreachable while column_count >= 1, but never read a stale count.
            return Err(self.out_of_bounds(ordinal as i64));
        };

        let extracted = match tag {
            TypeTag::String => cursor
                .get_string(ordinal)
                .map(|v| v.map_or(FieldValue::Null, FieldValue::Text)),
            TypeTag::Array => cursor
                .get_array(ordinal)
                .map(|v| v.map_or(FieldValue::Null, FieldValue::Array)),
            TypeTag::Boolean => cursor.get_boolean(ordinal).map(FieldValue::Boolean),
            TypeTag::Integer => cursor.get_integer(ordinal).map(FieldValue::Integer),
            TypeTag::Object => cursor.get_object(ordinal),
        };

        match extracted {
            Ok(value) => Ok(Some(value)),
            Err(e) => self.degrade("field", e, None),
        }
    }

    /// Like [`field`](Self::field), pairing the value with the tag it was read as.
    pub fn typed_field(
        &self,
        field: impl Into<FieldRef>,
        tag: TypeTag,
    ) -> Result<Option<TypedValue>, QueryError> {
        Ok(self
            .field(field, tag)?
            .map(|value| TypedValue { tag, value }))
    }

    /// Release the attached handles.
    ///
    /// No-op when no cursor is attached. Otherwise the statement is released
    /// first (if `release_statement`), then the cursor (if `release_cursor`);
    /// released handles are detached. Release failures are logged, or in
    /// strict mode the first one is returned after both were attempted.
    pub fn close(
        &mut self,
        release_cursor: bool,
        release_statement: bool,
    ) -> Result<(), QueryError> {
        if self.cursor.is_none() {
            return Ok(());
        }

        let mut failure: Option<(&'static str, DriverError)> = None;

        if release_statement {
            if let Some(mut statement) = self.statement.take() {
                if let Err(e) = statement.close() {
                    self.note_release_failure("close statement", e, &mut failure);
                }
            }
        }

        if release_cursor {
            if let Some(mut cursor) = self.cursor.take() {
                self.column_count = UNKNOWN_COLUMN_COUNT;
                if let Err(e) = cursor.close() {
                    self.note_release_failure("close cursor", e, &mut failure);
                }
            }
        }

        tracing::debug!(
            query = %self.name,
            release_cursor,
            release_statement,
            "closed named query"
        );

        self.release_result(failure)
    }

    /// `close(true, true)`, then release a statement left attached without a
    /// cursor. Used wherever an execution must end with nothing attached.
    pub(crate) fn release_all(&mut self) -> Result<(), QueryError> {
        let closed = self.close(true, true);

        let mut failure: Option<(&'static str, DriverError)> = None;
        if let Some(mut statement) = self.statement.take() {
            if let Err(e) = statement.close() {
                self.note_release_failure("close statement", e, &mut failure);
            }
        }
        closed?;
        self.release_result(failure)
    }

    /// Attach a statement and cursor and return a guard that releases both
    /// when it goes out of scope.
    pub fn scope(
        &mut self,
        statement: Box<dyn Statement>,
        cursor: Box<dyn Cursor>,
    ) -> ExecutionScope<'_> {
        self.set_statement(statement);
        self.set_cursor(cursor);
        ExecutionScope::new(self)
    }

    fn resolve(&self, field: &FieldRef) -> Result<i64, QueryError> {
        match field {
            FieldRef::ByIndex(ordinal) => Ok(*ordinal),
            FieldRef::ByLabel(label) => {
                let unresolved = |reason: String| QueryError::UnresolvedField {
                    label: label.clone(),
                    reason,
                    max: self.column_count,
                };
                let cursor = self
                    .cursor
                    .as_deref()
                    .ok_or_else(|| unresolved("no cursor attached".to_string()))?;
                let ordinal = cursor
                    .find_column(label)
                    .map_err(|e| unresolved(e.to_string()))?;
                i64::try_from(ordinal)
                    .map_err(|_| unresolved(format!("driver returned ordinal {ordinal}")))
            }
        }
    }

    fn check_bounds(&self, ordinal: i64) -> Result<usize, QueryError> {
        if ordinal < FIRST_COLUMN || ordinal > self.column_count {
            return Err(self.out_of_bounds(ordinal));
        }
        usize::try_from(ordinal).map_err(|_| self.out_of_bounds(ordinal))
    }

    fn out_of_bounds(&self, attempted: i64) -> QueryError {
        QueryError::OutOfBounds {
            attempted,
            min: FIRST_COLUMN,
            max: self.column_count,
        }
    }

    /// Lenient: log and fall back. Strict: surface the driver failure.
    fn degrade<T>(
        &self,
        operation: &'static str,
        source: DriverError,
        fallback: T,
    ) -> Result<T, QueryError> {
        if self.strictness.is_strict() {
            return Err(QueryError::Driver {
                name: self.name.clone(),
                operation,
                source,
            });
        }
        tracing::warn!(query = %self.name, operation, error = %source, "driver failure ignored");
        Ok(fallback)
    }

    fn release_result(
        &self,
        failure: Option<(&'static str, DriverError)>,
    ) -> Result<(), QueryError> {
        match failure {
            Some((operation, source)) => Err(QueryError::Driver {
                name: self.name.clone(),
                operation,
                source,
            }),
            None => Ok(()),
        }
    }

    fn note_release_failure(
        &self,
        operation: &'static str,
        source: DriverError,
        failure: &mut Option<(&'static str, DriverError)>,
    ) {
        if self.strictness.is_strict() {
            if failure.is_none() {
                *failure = Some((operation, source));
            }
            return;
        }
        tracing::warn!(query = %self.name, operation, error = %source, "release failure ignored");
    }
}

impl fmt::Debug for NamedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedQuery")
            .field("name", &self.name)
            .field("text_loaded", &self.text.is_some())
            .field("has_statement", &self.has_statement())
            .field("has_cursor", &self.has_cursor())
            .field("column_count", &self.column_count)
            .field("strictness", &self.strictness)
            .finish()
    }
}

impl Drop for NamedQuery {
    fn drop(&mut self) {
        if self.cursor.is_none() && self.statement.is_none() {
            return;
        }
        tracing::warn!(
            query = %self.name,
            has_cursor = self.has_cursor(),
            has_statement = self.has_statement(),
            "named query dropped with attached resources, releasing them"
        );
        self.strictness = Strictness::Lenient;
        let _ = self.release_all();
    }
}
