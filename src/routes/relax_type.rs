//! Relax type routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::models::{RelaxType, RelaxTypePatch};
use crate::routes::PageQuery;
use crate::services::RelaxTypeService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub fn relax_type_routes() -> Router<AppState> {
    Router::new()
        .route("/all", get(list_relax_types))
        .route("/name/:name", get(get_relax_type_by_name))
        .route("/", post(create_relax_type))
        .route(
            "/:id",
            get(get_relax_type)
                .put(update_relax_type)
                .delete(delete_relax_type),
        )
}

#[derive(Debug, Deserialize)]
pub struct CreateRelaxTypeRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRelaxTypeRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RelaxTypeResponse {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RelaxType> for RelaxTypeResponse {
    fn from(t: RelaxType) -> Self {
        Self {
            id: t.id,
            name: t.name,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// GET /relax-types/all - public listing
async fn list_relax_types(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<Vec<RelaxTypeResponse>>> {
    let types = RelaxTypeService::list(state.db(), page.offset, page.limit).await?;
    Ok(Json(types.into_iter().map(Into::into).collect()))
}

/// GET /relax-types/:id
async fn get_relax_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<RelaxTypeResponse>> {
    let relax_type = RelaxTypeService::fetch_by_id(state.db(), id).await?;
    Ok(Json(relax_type.into()))
}

/// GET /relax-types/name/:name
async fn get_relax_type_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<RelaxTypeResponse>> {
    let relax_type = RelaxTypeService::fetch_by_name(state.db(), &name).await?;
    Ok(Json(relax_type.into()))
}

/// POST /relax-types
async fn create_relax_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateRelaxTypeRequest>,
) -> ApiResult<(StatusCode, Json<RelaxTypeResponse>)> {
    let admin_only = state.config().policy.relax_type_admin_only;
    let relax_type =
        RelaxTypeService::create(state.db(), req.name, auth.actor(), admin_only).await?;
    Ok((StatusCode::CREATED, Json(relax_type.into())))
}

/// PUT /relax-types/:id
async fn update_relax_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRelaxTypeRequest>,
) -> ApiResult<Json<RelaxTypeResponse>> {
    let admin_only = state.config().policy.relax_type_admin_only;
    let patch = RelaxTypePatch { name: req.name };
    let relax_type =
        RelaxTypeService::update(state.db(), id, patch, auth.actor(), admin_only).await?;
    Ok(Json(relax_type.into()))
}

/// DELETE /relax-types/:id
async fn delete_relax_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let admin_only = state.config().policy.relax_type_admin_only;
    RelaxTypeService::delete(state.db(), id, auth.actor(), admin_only).await?;
    Ok(Json(serde_json::json!({
        "detail": format!("Relax type with id {id} deleted.")
    })))
}
