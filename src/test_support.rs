//! Test doubles shared by unit and HTTP tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, FromRow};

use crate::database::connect_in_memory;
use crate::store::{ExecOutcome, ResourceStore, SqliteStore, Statement, StoreError};

/// Wraps an in-memory [`SqliteStore`] and records every executed statement.
pub struct RecordingStore {
    inner: SqliteStore,
    executed: Mutex<Vec<Statement>>,
    zero_changes: AtomicBool,
    hide_after_execute: AtomicBool,
    executed_once: AtomicBool,
}

pub async fn recording_store() -> RecordingStore {
    let pool = connect_in_memory().await.expect("in-memory sqlite");
    RecordingStore {
        inner: SqliteStore::new(pool),
        executed: Mutex::new(Vec::new()),
        zero_changes: AtomicBool::new(false),
        hide_after_execute: AtomicBool::new(false),
        executed_once: AtomicBool::new(false),
    }
}

impl RecordingStore {
    pub fn executed(&self) -> Vec<Statement> {
        self.executed.lock().expect("recorder lock").clone()
    }

    pub fn reset(&self) {
        self.executed.lock().expect("recorder lock").clear();
        self.executed_once.store(false, Ordering::SeqCst);
    }

    /// Makes every later `execute` report zero changed rows without touching the table.
    pub fn force_zero_changes(&self) {
        self.zero_changes.store(true, Ordering::SeqCst);
    }

    /// Makes `query_one` find nothing once any `execute` has run, as if the
    /// row were deleted right after the write.
    pub fn hide_rows_after_execute(&self) {
        self.hide_after_execute.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResourceStore for RecordingStore {
    async fn query_one<R>(&self, statement: &Statement) -> Result<Option<R>, StoreError>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        if self.hide_after_execute.load(Ordering::SeqCst)
            && self.executed_once.load(Ordering::SeqCst)
        {
            return Ok(None);
        }
        self.inner.query_one(statement).await
    }

    async fn query_all<R>(&self, statement: &Statement) -> Result<Vec<R>, StoreError>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        self.inner.query_all(statement).await
    }

    async fn execute(&self, statement: &Statement) -> Result<ExecOutcome, StoreError> {
        self.executed.lock().expect("recorder lock").push(statement.clone());
        self.executed_once.store(true, Ordering::SeqCst);
        if self.zero_changes.load(Ordering::SeqCst) {
            return Ok(ExecOutcome { changed: 0, last_insert_id: 0 });
        }
        self.inner.execute(statement).await
    }
}
