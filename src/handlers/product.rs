// src/handlers/product.rs
use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, instrument};

use crate::dtos::product::{ProductCreatedResponse, ProductListResponse};
use crate::error::{AppError, TaggedError};
use crate::extract::JsonPayload;
use crate::state::AppState;
use crate::validation::product::validate_create;

// GET /products - Showcase records followed by stored products
#[instrument(skip(state))]
pub async fn get_products(State(state): State<AppState>) -> Json<ProductListResponse> {
    Json(ProductListResponse {
        data: state.catalog.list().await,
    })
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<JsonPayload, AppError>,
) -> Result<(StatusCode, Json<ProductCreatedResponse>), TaggedError> {
    let JsonPayload(body) = payload?;

    let new_product = validate_create(&body).map_err(|errors| {
        info!(count = errors.messages().len(), "Product payload rejected");
        AppError::validation("Invalid product data", errors)
    })?;

    let product = state.catalog.insert(new_product).await;
    Ok((StatusCode::CREATED, Json(ProductCreatedResponse::from(product))))
}
