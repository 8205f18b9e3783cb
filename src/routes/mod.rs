pub mod products;
pub mod users;

use axum::{routing::get, Router};
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(users::routes())
}

/// Full application: API under `/api` plus the banner and health routes.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .nest("/api", create_router())
        .route("/", get(|| async { "Catalog API" }))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
