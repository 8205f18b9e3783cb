// src/error.rs
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::planner::PlanError;
use crate::store::StoreError;
use crate::validation::user::UserValidationError;
use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    /// Body was not a JSON object.
    #[error("invalid payload format")]
    MalformedPayload,

    #[error("{message}")]
    Validation {
        message: &'static str,
        errors: ValidationErrors,
    },

    #[error("no fields to update")]
    EmptyUpdate,

    #[error("{0}")]
    NotFound(String),

    /// The store changed nothing after the target was confirmed to exist.
    #[error("{0}")]
    MutationFailure(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn mutation_failed(msg: impl Into<String>) -> Self {
        AppError::MutationFailure(msg.into())
    }

    pub fn validation(message: &'static str, errors: ValidationErrors) -> Self {
        AppError::Validation { message, errors }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload | AppError::Validation { .. } | AppError::EmptyUpdate => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MutationFailure(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the response body; `tagged` adds `"status": "error"`.
    fn into_response_with(self, tagged: bool) -> Response {
        let status = self.status_code();
        let (message, errors) = match self {
            AppError::Validation { message, errors } => {
                (message.to_string(), Some(errors.into_messages()))
            }
            AppError::Store(err) => {
                error!(error = %err, "Store operation failed");
                ("Database error occurred".to_string(), None)
            }
            other => (other.to_string(), None),
        };

        let body = ErrorBody {
            status: tagged.then_some("error"),
            message,
            errors,
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}

/// An [`AppError`] rendered with `"status": "error"`, as product routes reply.
#[derive(Debug)]
pub struct TaggedError(pub AppError);

impl From<AppError> for TaggedError {
    fn from(err: AppError) -> Self {
        TaggedError(err)
    }
}

impl IntoResponse for TaggedError {
    fn into_response(self) -> Response {
        self.0.into_response_with(true)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Store(StoreError::Database(err))
    }
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::EmptyUpdate => AppError::EmptyUpdate,
        }
    }
}

impl From<UserValidationError> for AppError {
    fn from(err: UserValidationError) -> Self {
        match err {
            UserValidationError::Invalid(errors) => AppError::validation("Validation Failed", errors),
            UserValidationError::EmptyUpdate => AppError::EmptyUpdate,
        }
    }
}
