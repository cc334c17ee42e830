//! Generic resource service
//!
//! The single entry point route handlers go through: fetch, list, update,
//! delete with the not-found contract and the authorization check applied in
//! a fixed order (fetch fresh state first, then authorize, then write).
//! Create paths stay per-kind because their domain rules differ; they live
//! in the sibling service modules.

use crate::auth::policy::{authorize, Action, Actor, Governed};
use crate::error::ApiError;
use crate::repository::{Entity, Filter, Repository, UpdatePatch, DEFAULT_PAGE_SIZE};
use sqlx::PgPool;
use std::marker::PhantomData;

pub struct ResourceService<E> {
    _entity: PhantomData<E>,
}

impl<E: Entity + Governed> ResourceService<E> {
    /// Fetch by id; absent rows are a typed NotFound with the id echoed.
    pub async fn fetch_by_id(pool: &PgPool, id: i64) -> Result<E, ApiError> {
        Repository::<E>::get_one(pool, &Filter::ById(id))
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("{} with id {} not found", E::KIND, id)))
    }

    /// Fetch by unique name, case-sensitive exact match.
    pub async fn fetch_by_name(pool: &PgPool, name: &str) -> Result<E, ApiError> {
        Repository::<E>::get_one(pool, &Filter::ByName(name.to_string()))
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("{} with name {} not found", E::KIND, name)))
    }

    /// Paginated listing, public.
    pub async fn list(
        pool: &PgPool,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<E>, ApiError> {
        let rows = Repository::<E>::get_many(
            pool,
            None,
            offset.unwrap_or(0),
            limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .await?;
        Ok(rows)
    }

    /// Listing scoped to one owner (the `/my` routes).
    pub async fn list_owned(
        pool: &PgPool,
        owner_id: i64,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<E>, ApiError> {
        let rows = Repository::<E>::get_many(
            pool,
            Some(&Filter::ByOwner(owner_id)),
            offset.unwrap_or(0),
            limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .await?;
        Ok(rows)
    }

    /// Fetch, authorize against the fresh row, then apply the patch through
    /// the parametrized update path.
    pub async fn update<P: UpdatePatch<E>>(
        pool: &PgPool,
        id: i64,
        patch: &P,
        actor: Option<&Actor>,
    ) -> Result<E, ApiError> {
        let entity = Self::fetch_by_id(pool, id).await?;
        authorize(actor, Action::Update, entity.ownership())?;
        Ok(Repository::<E>::update(pool, &entity, patch).await?)
    }

    /// Fetch, authorize, delete. Deleting an absent id is NotFound, never a
    /// silent no-op.
    pub async fn delete(pool: &PgPool, id: i64, actor: Option<&Actor>) -> Result<(), ApiError> {
        let entity = Repository::<E>::get_one(pool, &Filter::ById(id))
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "{} with id {} not found. Cannot delete.",
                    E::KIND,
                    id
                ))
            })?;
        authorize(actor, Action::Delete, entity.ownership())?;
        Ok(Repository::<E>::delete(pool, &entity).await?)
    }
}
