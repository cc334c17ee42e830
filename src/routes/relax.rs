//! Relax activity routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::models::{RelaxActivity, RelaxActivityPatch};
use crate::routes::PageQuery;
use crate::services::{CreateRelaxActivityInput, RelaxService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub fn relax_routes() -> Router<AppState> {
    Router::new()
        .route("/all", get(list_relax_activities))
        .route("/my", get(my_relax_activities))
        .route("/name/:name", get(get_relax_activity_by_name))
        .route("/", post(create_relax_activity))
        .route(
            "/:id",
            get(get_relax_activity)
                .put(update_relax_activity)
                .delete(delete_relax_activity),
        )
}

#[derive(Debug, Deserialize)]
pub struct CreateRelaxActivityRequest {
    pub name: String,
    pub description: Option<String>,
    pub relax_type_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRelaxActivityRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub relax_type_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RelaxActivityResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub relax_type_id: i64,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RelaxActivity> for RelaxActivityResponse {
    fn from(r: RelaxActivity) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            relax_type_id: r.relax_type_id,
            owner_id: r.owner_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// GET /relax/all - public listing
async fn list_relax_activities(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<Vec<RelaxActivityResponse>>> {
    let activities = RelaxService::list(state.db(), page.offset, page.limit).await?;
    Ok(Json(activities.into_iter().map(Into::into).collect()))
}

/// GET /relax/my - activities owned by the caller
async fn my_relax_activities(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<Vec<RelaxActivityResponse>>> {
    let activities =
        RelaxService::list_mine(state.db(), auth.actor(), page.offset, page.limit).await?;
    Ok(Json(activities.into_iter().map(Into::into).collect()))
}

/// GET /relax/:id
async fn get_relax_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<RelaxActivityResponse>> {
    let activity = RelaxService::fetch_by_id(state.db(), id).await?;
    Ok(Json(activity.into()))
}

/// GET /relax/name/:name
async fn get_relax_activity_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<RelaxActivityResponse>> {
    let activity = RelaxService::fetch_by_name(state.db(), &name).await?;
    Ok(Json(activity.into()))
}

/// POST /relax - create with the allow-list gate
async fn create_relax_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateRelaxActivityRequest>,
) -> ApiResult<(StatusCode, Json<RelaxActivityResponse>)> {
    let input = CreateRelaxActivityInput {
        name: req.name,
        description: req.description,
        relax_type_id: req.relax_type_id,
    };
    let activity =
        RelaxService::create(state.db(), input, auth.actor(), state.allow_list()).await?;
    Ok((StatusCode::CREATED, Json(activity.into())))
}

/// PUT /relax/:id - partial update
async fn update_relax_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRelaxActivityRequest>,
) -> ApiResult<Json<RelaxActivityResponse>> {
    let patch = RelaxActivityPatch {
        name: req.name,
        description: req.description,
        relax_type_id: req.relax_type_id,
    };
    let activity = RelaxService::update(state.db(), id, patch, auth.actor()).await?;
    Ok(Json(activity.into()))
}

/// DELETE /relax/:id
async fn delete_relax_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    RelaxService::delete(state.db(), id, auth.actor()).await?;
    Ok(Json(serde_json::json!({
        "detail": format!("Relax activity with id {id} deleted.")
    })))
}
