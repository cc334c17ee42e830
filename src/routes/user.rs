//! User management routes (admin surface)

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::routes::PageQuery;
use crate::services::{UpdateUserInput, UserProfile, UserService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/all", get(list_users))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub is_admin: Option<bool>,
    pub is_active: Option<bool>,
}

/// GET /users/all - admin only
async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<Vec<UserProfile>>> {
    let users = UserService::list(state.db(), auth.actor(), page.offset, page.limit).await?;
    Ok(Json(users))
}

/// GET /users/:id - admin only
async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<UserProfile>> {
    let user = UserService::fetch_by_id(state.db(), id, auth.actor()).await?;
    Ok(Json(user))
}

/// PUT /users/:id - admin only
async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserProfile>> {
    let input = UpdateUserInput {
        email: req.email,
        password: req.password,
        full_name: req.full_name,
        is_admin: req.is_admin,
        is_active: req.is_active,
    };
    let user = UserService::update(state.db(), id, input, auth.actor()).await?;
    Ok(Json(user))
}

/// DELETE /users/:id - admin only
async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    UserService::delete(state.db(), id, auth.actor()).await?;
    Ok(Json(serde_json::json!({
        "detail": format!("User with id {id} deleted.")
    })))
}
