//! User endpoints
//!
//! Each handler runs one repository call (one SQL statement) and
//! writes one JSON response.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::instrument;

use crate::db::repos::{User, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonOrDefault, ValidJson, ValidUserId};
use crate::http::server::AppState;
use crate::models::{NewUser, UserFilter, UserPatch};

/// Delete response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: u64,
}

/// GET /users - list all users
#[instrument(name = "list_users", skip_all)]
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepo::new(&state.pool).list().await?;
    Ok(Json(users))
}

/// GET /users/{userid} - fetch one user
#[instrument(name = "find_user", skip_all, fields(user_id = id))]
async fn find_user(
    State(state): State<Arc<AppState>>,
    ValidUserId(id): ValidUserId,
) -> Result<Json<User>, ApiError> {
    let user = UserRepo::new(&state.pool).get(id).await?;
    Ok(Json(user))
}

/// POST /create-user - insert a user, id assigned by the store
#[instrument(name = "create_user", skip_all)]
async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    req.validate()?;
    let user = UserRepo::new(&state.pool).create(&req).await?;
    tracing::debug!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users/{userid} - change the fields present in the body
#[instrument(name = "update_user", skip_all, fields(user_id = id))]
async fn update_user(
    State(state): State<Arc<AppState>>,
    ValidUserId(id): ValidUserId,
    ValidJson(patch): ValidJson<UserPatch>,
) -> Result<Json<User>, ApiError> {
    patch.validate()?;
    let user = UserRepo::new(&state.pool).update(id, &patch).await?;
    Ok(Json(user))
}

/// DELETE /users/{userid} - remove a user
#[instrument(name = "delete_user", skip_all, fields(user_id = id))]
async fn delete_user(
    State(state): State<Arc<AppState>>,
    ValidUserId(id): ValidUserId,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = UserRepo::new(&state.pool).delete(id).await?;
    Ok(Json(DeleteResponse { deleted }))
}

/// POST /users/search - AND of equality filters; empty body lists all
#[instrument(name = "search_users", skip_all)]
async fn search_users(
    State(state): State<Arc<AppState>>,
    JsonOrDefault(filter): JsonOrDefault<UserFilter>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepo::new(&state.pool).search(&filter).await?;
    tracing::debug!(matched = users.len(), "Search complete");
    Ok(Json(users))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/search", post(search_users))
        .route(
            "/users/{userid}",
            get(find_user).put(update_user).delete(delete_user),
        )
        .route("/create-user", post(create_user))
}
