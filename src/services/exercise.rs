//! Exercise service

use crate::auth::policy::Actor;
use crate::error::ApiError;
use crate::models::{CreateExercise, Exercise, ExercisePatch};
use crate::repository::Repository;
use crate::services::resource::ResourceService;
use sqlx::PgPool;

/// Input for creating an exercise; the owner comes from the actor.
#[derive(Debug, Clone)]
pub struct CreateExerciseInput {
    pub name: String,
    pub description: Option<String>,
}

pub struct ExerciseService;

impl ExerciseService {
    pub async fn fetch_by_id(pool: &PgPool, id: i64) -> Result<Exercise, ApiError> {
        ResourceService::<Exercise>::fetch_by_id(pool, id).await
    }

    pub async fn fetch_by_name(pool: &PgPool, name: &str) -> Result<Exercise, ApiError> {
        ResourceService::<Exercise>::fetch_by_name(pool, name).await
    }

    pub async fn list(
        pool: &PgPool,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<Exercise>, ApiError> {
        ResourceService::<Exercise>::list(pool, offset, limit).await
    }

    pub async fn list_mine(
        pool: &PgPool,
        actor: &Actor,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<Exercise>, ApiError> {
        ResourceService::<Exercise>::list_owned(pool, actor.user_id, offset, limit).await
    }

    /// Create an exercise owned by the actor. Name uniqueness is enforced
    /// atomically by the store.
    pub async fn create(
        pool: &PgPool,
        input: CreateExerciseInput,
        actor: &Actor,
    ) -> Result<Exercise, ApiError> {
        if input.name.trim().is_empty() {
            return Err(ApiError::Validation("Exercise name must not be empty".to_string()));
        }
        let payload = CreateExercise {
            name: input.name,
            description: input.description,
            owner_id: actor.user_id,
        };
        Ok(Repository::<Exercise>::create(pool, &payload).await?)
    }

    /// Partial update; ownership reassignment is reserved for admins.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        patch: ExercisePatch,
        actor: &Actor,
    ) -> Result<Exercise, ApiError> {
        if patch.owner_id.is_some() && !actor.is_admin {
            return Err(ApiError::Forbidden(
                "Only admins may reassign ownership".to_string(),
            ));
        }
        ResourceService::<Exercise>::update(pool, id, &patch, Some(actor)).await
    }

    pub async fn delete(pool: &PgPool, id: i64, actor: &Actor) -> Result<(), ApiError> {
        ResourceService::<Exercise>::delete(pool, id, Some(actor)).await
    }
}
