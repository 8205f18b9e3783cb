// src/dtos/product.rs
use serde::Serialize;
use crate::models::product::Product;

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub data: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ProductCreatedResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub data: Product,
}

impl From<Product> for ProductCreatedResponse {
    fn from(product: Product) -> Self {
        Self {
            status: "success",
            message: "Product created",
            data: product,
        }
    }
}
