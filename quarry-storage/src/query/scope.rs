//! ExecutionScope: releases a named query's statement and cursor on every
//! exit path.

use std::ops::{Deref, DerefMut};

use quarry_core::errors::QueryError;

use super::NamedQuery;

/// Guard over a named query with an attached execution.
///
/// Dropping the guard releases every attached handle and logs any failure,
/// including a statement left behind after the cursor was closed. Call
/// [`finish`](Self::finish) instead to observe the close result.
pub struct ExecutionScope<'q> {
    query: &'q mut NamedQuery,
    finished: bool,
}

impl<'q> ExecutionScope<'q> {
    /// Take charge of releasing whatever is attached to `query`.
    pub fn new(query: &'q mut NamedQuery) -> Self {
        Self {
            query,
            finished: false,
        }
    }

    /// Release the statement and cursor now and report the outcome.
    pub fn finish(mut self) -> Result<(), QueryError> {
        self.finished = true;
        self.query.release_all()
    }
}

impl Deref for ExecutionScope<'_> {
    type Target = NamedQuery;

    fn deref(&self) -> &NamedQuery {
        &*self.query
    }
}

impl DerefMut for ExecutionScope<'_> {
    fn deref_mut(&mut self) -> &mut NamedQuery {
        &mut *self.query
    }
}

impl Drop for ExecutionScope<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.query.release_all() {
            tracing::warn!(query = %self.query.name(), error = %e, "scoped release failed");
        }
    }
}
