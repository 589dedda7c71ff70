//! /users CRUD against the central registry

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::app::AppState;
use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, User, UserPatch};
use crate::error::{ApiError, ApiResult};

use super::utils::{decode_body, store_error};

/// POST /users
pub async fn create(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<User>> {
    let user: NewUser = decode_body(&body)?;

    let user = state
        .registry
        .create_user(user)
        .await
        .map_err(|e| store_error(e, "could not create user"))?;

    tracing::info!("Created user {} ({})", user.username, user.id);
    Ok(Json(user))
}

/// GET /users
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state
        .registry
        .list_users()
        .await
        .map_err(|e| store_error(e, "could not list users"))?;
    Ok(Json(users))
}

/// GET /users/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<User>> {
    find(&state, &id).await.map(|(_, user)| Json(user))
}

/// PUT /users/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<User>> {
    let (id, _) = find(&state, &id).await?;
    let patch: UserPatch = decode_body(&body)?;

    let user = state
        .registry
        .update_user(id, patch)
        .await
        .map_err(|e| store_error(e, "could not update user"))?;

    Ok(Json(user))
}

/// DELETE /users/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    // Ids that are not numbers cannot name a row
    let Some(id) = parse_id(&id) else {
        return Ok(StatusCode::NO_CONTENT);
    };

    match state.registry.delete_user(id).await {
        Ok(()) => {
            tracing::info!("Deleted user {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        Err(DatabaseError::NotFound(_)) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(store_error(e, "could not delete user")),
    }
}

async fn find(state: &AppState, raw_id: &str) -> ApiResult<(i64, User)> {
    let not_found = || ApiError::not_found("user not found");
    let id = parse_id(raw_id).ok_or_else(not_found)?;

    let user = state
        .registry
        .find_user(id)
        .await
        .map_err(|e| store_error(e, "could not load user"))?
        .ok_or_else(not_found)?;

    Ok((id, user))
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}
