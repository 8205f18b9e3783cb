// src/extract.rs
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::AppError;

/// Request body parsed as a JSON object.
///
/// The body is parsed regardless of `Content-Type`. Anything that isn't a
/// JSON object is rejected with [`AppError::MalformedPayload`] before any
/// field validation runs.
#[derive(Debug)]
pub struct JsonPayload(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::MalformedPayload)?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(JsonPayload(map)),
            Ok(_) => {
                debug!("Rejected non-object JSON body");
                Err(AppError::MalformedPayload)
            }
            Err(e) => {
                debug!(error = %e, "Rejected unparsable body");
                Err(AppError::MalformedPayload)
            }
        }
    }
}
