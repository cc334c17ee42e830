//! Relax activity service
//!
//! Creation is gated twice before any write happens: the referenced relax
//! type must exist, and its name must be in the configured allow-list.

use crate::allow_list::AllowList;
use crate::auth::policy::Actor;
use crate::error::ApiError;
use crate::models::{CreateRelaxActivity, RelaxActivity, RelaxActivityPatch, RelaxType};
use crate::repository::{Filter, Repository};
use crate::services::resource::ResourceService;
use sqlx::PgPool;

#[derive(Debug, Clone)]
pub struct CreateRelaxActivityInput {
    pub name: String,
    pub description: Option<String>,
    pub relax_type_id: i64,
}

pub struct RelaxService;

impl RelaxService {
    pub async fn fetch_by_id(pool: &PgPool, id: i64) -> Result<RelaxActivity, ApiError> {
        ResourceService::<RelaxActivity>::fetch_by_id(pool, id).await
    }

    pub async fn fetch_by_name(pool: &PgPool, name: &str) -> Result<RelaxActivity, ApiError> {
        ResourceService::<RelaxActivity>::fetch_by_name(pool, name).await
    }

    pub async fn list(
        pool: &PgPool,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<RelaxActivity>, ApiError> {
        ResourceService::<RelaxActivity>::list(pool, offset, limit).await
    }

    pub async fn list_mine(
        pool: &PgPool,
        actor: &Actor,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<RelaxActivity>, ApiError> {
        ResourceService::<RelaxActivity>::list_owned(pool, actor.user_id, offset, limit).await
    }

    /// Create a relax activity owned by the actor.
    ///
    /// Resolves `relax_type_id` first and rejects the request before any
    /// write when the type is missing or its name is not allow-listed.
    pub async fn create(
        pool: &PgPool,
        input: CreateRelaxActivityInput,
        actor: &Actor,
        allow_list: &AllowList,
    ) -> Result<RelaxActivity, ApiError> {
        if input.name.trim().is_empty() {
            return Err(ApiError::Validation(
                "Relax activity name must not be empty".to_string(),
            ));
        }
        let relax_type = Repository::<RelaxType>::get_one(pool, &Filter::ById(input.relax_type_id))
            .await?
            .ok_or_else(|| {
                ApiError::Validation(format!(
                    "Relax type with id {} does not exist",
                    input.relax_type_id
                ))
            })?;

        if !allow_list.contains(&relax_type.name) {
            return Err(ApiError::Validation(format!(
                "Relax type {} is not allowed",
                relax_type.name
            )));
        }

        let payload = CreateRelaxActivity {
            name: input.name,
            description: input.description,
            relax_type_id: input.relax_type_id,
            owner_id: actor.user_id,
        };
        Ok(Repository::<RelaxActivity>::create(pool, &payload).await?)
    }

    /// Partial update. The allow-list is a create-time gate only; changing
    /// `relax_type_id` here is checked for existence by the foreign key.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        patch: RelaxActivityPatch,
        actor: &Actor,
    ) -> Result<RelaxActivity, ApiError> {
        ResourceService::<RelaxActivity>::update(pool, id, &patch, Some(actor)).await
    }

    pub async fn delete(pool: &PgPool, id: i64, actor: &Actor) -> Result<(), ApiError> {
        ResourceService::<RelaxActivity>::delete(pool, id, Some(actor)).await
    }
}
