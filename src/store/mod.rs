//! Persistence seams.
//!
//! Users live in SQLite behind [`ResourceStore`]; products live in the
//! in-process [`ProductCatalog`].

pub mod products;
pub mod sqlite;
mod statement;

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, FromRow};
use thiserror::Error;

pub use products::ProductCatalog;
pub use sqlite::SqliteStore;
pub use statement::{Param, Statement};

/// Result of a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOutcome {
    pub changed: u64,
    pub last_insert_id: i64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to bind parameter `{name}`: {source}")]
    Bind {
        name: &'static str,
        #[source]
        source: sqlx::error::BoxDynError,
    },
}

/// Executes parameterized statements and reports rows or change counts.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn query_one<R>(&self, statement: &Statement) -> Result<Option<R>, StoreError>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin;

    async fn query_all<R>(&self, statement: &Statement) -> Result<Vec<R>, StoreError>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin;

    async fn execute(&self, statement: &Statement) -> Result<ExecOutcome, StoreError>;
}
