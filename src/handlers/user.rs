// src/handlers/user.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info, instrument, warn};

use crate::dtos::user::UserEnvelope;
use crate::error::AppError;
use crate::extract::JsonPayload;
use crate::models::user::{NewUser, User};
use crate::planner::{self, FieldSet};
use crate::state::AppState;
use crate::store::ResourceStore;
use crate::validation::user::{validate_create, validate_update};

/// Path ids that aren't integers can't name a row.
fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::not_found("User not found"))
}

// GET /users
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<UserEnvelope<Vec<User>>>, AppError> {
    let users: Vec<User> = state.store.query_all(&planner::select_users()).await?;
    Ok(Json(UserEnvelope::with_data("List of users", users)))
}

// GET /users/:id
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserEnvelope<User>>, AppError> {
    let id = parse_user_id(&raw_id)?;
    let user: User = state
        .store
        .query_one(&planner::select_user(id))
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserEnvelope::with_data(format!("User details for ID: {id}"), user)))
}

// POST /users
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<JsonPayload, AppError>,
) -> Result<(StatusCode, Json<UserEnvelope<User>>), AppError> {
    let JsonPayload(body) = payload?;
    let new_user = validate_create(&body)?;
    let user = insert_user(&state.store, &new_user).await?;
    Ok((StatusCode::CREATED, Json(UserEnvelope::with_data("User created", user))))
}

// PUT /users/:id
#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<JsonPayload, AppError>,
) -> Result<Json<UserEnvelope<User>>, AppError> {
    let JsonPayload(body) = payload?;
    let fields = validate_update(&body)?;
    let id = parse_user_id(&raw_id)?;
    let user = apply_update(&state.store, id, &fields).await?;
    Ok(Json(UserEnvelope::with_data("User updated", user)))
}

// DELETE /users/:id
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserEnvelope<()>>, AppError> {
    let id = parse_user_id(&raw_id)?;
    remove_user(&state.store, id).await?;
    Ok(Json(UserEnvelope::message_only("User deleted")))
}

pub(crate) async fn insert_user<S: ResourceStore>(store: &S, new_user: &NewUser) -> Result<User, AppError> {
    let outcome = store.execute(&planner::insert_user(new_user)).await?;
    if outcome.changed == 0 {
        warn!("Insert reported no changes");
        return Err(AppError::mutation_failed("Failed to create user"));
    }

    let user: User = store
        .query_one(&planner::select_user(outcome.last_insert_id))
        .await?
        .ok_or_else(|| AppError::mutation_failed("Failed to create user"))?;
    info!(id = user.id, "User created");
    Ok(user)
}

/// Check-exists, then update only the supplied fields, then re-read.
pub(crate) async fn apply_update<S: ResourceStore>(
    store: &S,
    id: i64,
    fields: &FieldSet,
) -> Result<User, AppError> {
    ensure_exists(store, id).await?;

    let statement = planner::plan_update(id, fields)?;
    debug!(id, params = ?statement.param_names(), "Planned user update");
    let outcome = store.execute(&statement).await?;
    if outcome.changed == 0 {
        warn!(id, "Update changed no rows after existence check");
        return Err(AppError::mutation_failed("Failed to update user"));
    }

    // Another request may delete the row between execute and re-read.
    let user: User = store
        .query_one(&planner::select_user(id))
        .await?
        .ok_or_else(|| AppError::mutation_failed("Failed to update user"))?;
    info!(id, fields = fields.len(), "User updated");
    Ok(user)
}

pub(crate) async fn remove_user<S: ResourceStore>(store: &S, id: i64) -> Result<(), AppError> {
    ensure_exists(store, id).await?;

    let outcome = store.execute(&planner::delete_user(id)).await?;
    if outcome.changed == 0 {
        warn!(id, "Delete changed no rows after existence check");
        return Err(AppError::mutation_failed("Failed to delete user"));
    }
    info!(id, "User deleted");
    Ok(())
}

async fn ensure_exists<S: ResourceStore>(store: &S, id: i64) -> Result<(), AppError> {
    let existing: Option<User> = store.query_one(&planner::select_user(id)).await?;
    match existing {
        Some(_) => Ok(()),
        None => Err(AppError::not_found("User not found")),
    }
}
