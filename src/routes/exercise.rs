//! Exercise routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::models::{Exercise, ExercisePatch};
use crate::routes::PageQuery;
use crate::services::{CreateExerciseInput, ExerciseService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/all", get(list_exercises))
        .route("/my", get(my_exercises))
        .route("/name/:name", get(get_exercise_by_name))
        .route("/", post(create_exercise))
        .route(
            "/:id",
            get(get_exercise).put(update_exercise).delete(delete_exercise),
        )
}

#[derive(Debug, Deserialize)]
pub struct CreateExerciseRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateExerciseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Exercise> for ExerciseResponse {
    fn from(e: Exercise) -> Self {
        Self {
            id: e.id,
            name: e.name,
            description: e.description,
            owner_id: e.owner_id,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// GET /exercises/all - public listing
async fn list_exercises(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<Vec<ExerciseResponse>>> {
    let exercises = ExerciseService::list(state.db(), page.offset, page.limit).await?;
    Ok(Json(exercises.into_iter().map(Into::into).collect()))
}

/// GET /exercises/my - exercises owned by the caller
async fn my_exercises(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<Vec<ExerciseResponse>>> {
    let exercises =
        ExerciseService::list_mine(state.db(), auth.actor(), page.offset, page.limit).await?;
    Ok(Json(exercises.into_iter().map(Into::into).collect()))
}

/// GET /exercises/:id
async fn get_exercise(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ExerciseResponse>> {
    let exercise = ExerciseService::fetch_by_id(state.db(), id).await?;
    Ok(Json(exercise.into()))
}

/// GET /exercises/name/:name
async fn get_exercise_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<ExerciseResponse>> {
    let exercise = ExerciseService::fetch_by_name(state.db(), &name).await?;
    Ok(Json(exercise.into()))
}

/// POST /exercises - create, owner stamped from the token
async fn create_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateExerciseRequest>,
) -> ApiResult<(StatusCode, Json<ExerciseResponse>)> {
    let input = CreateExerciseInput {
        name: req.name,
        description: req.description,
    };
    let exercise = ExerciseService::create(state.db(), input, auth.actor()).await?;
    Ok((StatusCode::CREATED, Json(exercise.into())))
}

/// PUT /exercises/:id - partial update
async fn update_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateExerciseRequest>,
) -> ApiResult<Json<ExerciseResponse>> {
    let patch = ExercisePatch {
        name: req.name,
        description: req.description,
        owner_id: req.owner_id,
    };
    let exercise = ExerciseService::update(state.db(), id, patch, auth.actor()).await?;
    Ok(Json(exercise.into()))
}

/// DELETE /exercises/:id
async fn delete_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    ExerciseService::delete(state.db(), id, auth.actor()).await?;
    Ok(Json(serde_json::json!({
        "detail": format!("Exercise with id {id} deleted.")
    })))
}
