// src/state.rs
use std::sync::Arc;

use crate::store::{ProductCatalog, SqliteStore};

#[derive(Clone)]
pub struct AppState {
    pub store: SqliteStore,
    pub catalog: Arc<ProductCatalog>,
}

impl AppState {
    pub fn new(db_pool: sqlx::SqlitePool) -> Self {
        Self {
            store: SqliteStore::new(db_pool),
            catalog: Arc::new(ProductCatalog::new()),
        }
    }
}
