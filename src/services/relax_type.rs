//! Relax type service
//!
//! Whether type management is open to all authenticated users or restricted
//! to admins is a configuration choice (`policy.relax_type_admin_only`);
//! the source system never resolved this, so it is explicit here.

use crate::auth::policy::{require_admin, Actor};
use crate::error::ApiError;
use crate::models::{CreateRelaxType, RelaxType, RelaxTypePatch};
use crate::repository::Repository;
use crate::services::resource::ResourceService;
use sqlx::PgPool;

pub struct RelaxTypeService;

impl RelaxTypeService {
    pub async fn fetch_by_id(pool: &PgPool, id: i64) -> Result<RelaxType, ApiError> {
        ResourceService::<RelaxType>::fetch_by_id(pool, id).await
    }

    pub async fn fetch_by_name(pool: &PgPool, name: &str) -> Result<RelaxType, ApiError> {
        ResourceService::<RelaxType>::fetch_by_name(pool, name).await
    }

    pub async fn list(
        pool: &PgPool,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<RelaxType>, ApiError> {
        ResourceService::<RelaxType>::list(pool, offset, limit).await
    }

    pub async fn create(
        pool: &PgPool,
        name: String,
        actor: &Actor,
        admin_only: bool,
    ) -> Result<RelaxType, ApiError> {
        if admin_only {
            require_admin(Some(actor))?;
        }
        if name.trim().is_empty() {
            return Err(ApiError::Validation(
                "Relax type name must not be empty".to_string(),
            ));
        }
        Ok(Repository::<RelaxType>::create(pool, &CreateRelaxType { name }).await?)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        patch: RelaxTypePatch,
        actor: &Actor,
        admin_only: bool,
    ) -> Result<RelaxType, ApiError> {
        if admin_only {
            require_admin(Some(actor))?;
        }
        ResourceService::<RelaxType>::update(pool, id, &patch, Some(actor)).await
    }

    /// Deleting a type still referenced by relax activities is restricted by
    /// the foreign key and surfaces as Conflict.
    pub async fn delete(
        pool: &PgPool,
        id: i64,
        actor: &Actor,
        admin_only: bool,
    ) -> Result<(), ApiError> {
        if admin_only {
            require_admin(Some(actor))?;
        }
        ResourceService::<RelaxType>::delete(pool, id, Some(actor)).await
    }
}
