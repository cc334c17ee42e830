//! Generic repository
//!
//! One CRUD implementation shared by every entity kind instead of a
//! near-identical data-access module per resource. An entity participates by
//! implementing [`Entity`] (table, kind name, column list) and providing
//! [`InsertPayload`] / [`UpdatePatch`] companions for its write shapes.
//!
//! Every value that originates from a request crosses into SQL exclusively
//! through `push_bind`, so it travels as a bound parameter and never as query
//! text. The only strings concatenated into statements are `&'static str`
//! constants owned by the entity traits.

use sqlx::postgres::PgRow;
use sqlx::query_builder::Separated;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::marker::PhantomData;
use thiserror::Error;

/// Default page size when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Hard ceiling on page size to keep result sets bounded.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A persisted record of one resource kind.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin {
    /// Table name, a compile-time constant (never request data).
    const TABLE: &'static str;
    /// Human-readable kind used in error messages, e.g. `"Exercise"`.
    const KIND: &'static str;
    /// Comma-separated column list for SELECT / RETURNING clauses.
    const COLUMNS: &'static str;

    fn id(&self) -> i64;
}

/// Columns and values for an INSERT of entity kind `E`.
pub trait InsertPayload<E: Entity>: Send + Sync {
    /// Columns written on insert; generated columns (id, timestamps) are
    /// left to the database.
    const INSERT_COLUMNS: &'static [&'static str];

    /// Bind one value per entry of `INSERT_COLUMNS`, in order.
    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>);
}

/// Partial-update shape for entity kind `E`. Absent fields are left alone.
pub trait UpdatePatch<E: Entity>: Send + Sync {
    /// Push `column = <bound value>` assignments for every present field.
    fn push_assignments(&self, assignments: &mut Separated<'_, '_, Postgres, &'static str>);

    /// True when no field is present and the update would be a no-op.
    fn is_empty(&self) -> bool;
}

/// Typed row predicates. Callers wanting a single row must pick a filter
/// that is unique by construction (id, or a unique field like name).
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    ById(i64),
    ByName(String),
    ByOwner(i64),
}

impl Filter {
    fn push(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Filter::ById(id) => {
                qb.push("id = ").push_bind(*id);
            }
            Filter::ByName(name) => {
                qb.push("name = ").push_bind(name.clone());
            }
            Filter::ByOwner(owner_id) => {
                qb.push("owner_id = ").push_bind(*owner_id);
            }
        }
    }
}

/// Store-level failures, tagged with the entity kind for error messages.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint would be violated by this write.
    #[error("{0} violates a uniqueness constraint")]
    Conflict(&'static str),

    /// A foreign key restricts this write (referenced row missing, or the
    /// row is still referenced by dependents).
    #[error("{0} is restricted by related records")]
    Restricted(&'static str),

    /// Anything transient or unexpected from the store. Surfaced, never
    /// swallowed or retried here.
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// Generic CRUD over an entity kind.
pub struct Repository<E> {
    _entity: PhantomData<E>,
}

impl<E: Entity> Repository<E> {
    /// Fetch at most one row matching `filter`, first by id ascending.
    pub async fn get_one(pool: &PgPool, filter: &Filter) -> Result<Option<E>, RepositoryError> {
        let mut qb = Self::select_statement(Some(filter));
        qb.push(" LIMIT 1");
        let row = qb.build_query_as::<E>().fetch_optional(pool).await?;
        Ok(row)
    }

    /// Fetch a page of rows, ordered by id ascending so repeated calls with
    /// the same arguments return the same page. `limit` is clamped to
    /// [`MAX_PAGE_SIZE`]; non-positive offsets are treated as zero.
    pub async fn get_many(
        pool: &PgPool,
        filter: Option<&Filter>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<E>, RepositoryError> {
        let mut qb = Self::select_statement(filter);
        qb.push(" LIMIT ")
            .push_bind(limit.clamp(1, MAX_PAGE_SIZE))
            .push(" OFFSET ")
            .push_bind(offset.max(0));
        let rows = qb.build_query_as::<E>().fetch_all(pool).await?;
        Ok(rows)
    }

    /// Insert a new row and return it with generated id and timestamps.
    ///
    /// Uniqueness is enforced by the database inside this single INSERT, so
    /// two concurrent creates of the same unique value resolve to exactly
    /// one success and one `Conflict`. There is no read-then-write window.
    pub async fn create<I: InsertPayload<E>>(
        pool: &PgPool,
        payload: &I,
    ) -> Result<E, RepositoryError> {
        let mut qb = Self::insert_statement(payload);
        qb.build_query_as::<E>()
            .fetch_one(pool)
            .await
            .map_err(Self::map_write_error)
    }

    /// Apply the fields present in `patch` to `entity` and return the fresh
    /// row. An empty patch performs no write and hands the entity back.
    pub async fn update<P: UpdatePatch<E>>(
        pool: &PgPool,
        entity: &E,
        patch: &P,
    ) -> Result<E, RepositoryError> {
        if patch.is_empty() {
            return Ok(entity.clone());
        }
        let mut qb = Self::update_statement(entity.id(), patch);
        qb.build_query_as::<E>()
            .fetch_one(pool)
            .await
            .map_err(Self::map_write_error)
    }

    /// Delete the row behind `entity`. The caller is expected to have
    /// fetched the entity first; deleting an already-absent row is not
    /// reported here.
    pub async fn delete(pool: &PgPool, entity: &E) -> Result<(), RepositoryError> {
        let mut qb = QueryBuilder::new("DELETE FROM ");
        qb.push(E::TABLE).push(" WHERE id = ").push_bind(entity.id());
        qb.build()
            .execute(pool)
            .await
            .map_err(Self::map_write_error)?;
        Ok(())
    }

    fn select_statement(filter: Option<&Filter>) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(E::COLUMNS).push(" FROM ").push(E::TABLE);
        if let Some(filter) = filter {
            qb.push(" WHERE ");
            filter.push(&mut qb);
        }
        qb.push(" ORDER BY id ASC");
        qb
    }

    fn insert_statement<I: InsertPayload<E>>(payload: &I) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("INSERT INTO ");
        qb.push(E::TABLE)
            .push(" (")
            .push(I::INSERT_COLUMNS.join(", "))
            .push(") VALUES (");
        {
            let mut values = qb.separated(", ");
            payload.push_values(&mut values);
        }
        qb.push(") RETURNING ").push(E::COLUMNS);
        qb
    }

    fn update_statement<P: UpdatePatch<E>>(
        entity_id: i64,
        patch: &P,
    ) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("UPDATE ");
        qb.push(E::TABLE).push(" SET ");
        {
            let mut assignments = qb.separated(", ");
            patch.push_assignments(&mut assignments);
            assignments.push("updated_at = now()");
        }
        qb.push(" WHERE id = ").push_bind(entity_id);
        qb.push(" RETURNING ").push(E::COLUMNS);
        qb
    }

    fn map_write_error(err: sqlx::Error) -> RepositoryError {
        if let sqlx::Error::Database(ref db) = err {
            if db.is_unique_violation() {
                return RepositoryError::Conflict(E::KIND);
            }
            if db.is_foreign_key_violation() {
                return RepositoryError::Restricted(E::KIND);
            }
        }
        RepositoryError::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateExercise, Exercise, ExercisePatch};

    #[test]
    fn test_select_by_id_is_parametrized() {
        let qb = Repository::<Exercise>::select_statement(Some(&Filter::ById(7)));
        assert_eq!(
            qb.sql(),
            "SELECT id, name, description, owner_id, created_at, updated_at \
             FROM exercises WHERE id = $1 ORDER BY id ASC"
        );
    }

    #[test]
    fn test_select_by_name_binds_value() {
        let hostile = "abc' OR '1'='1".to_string();
        let qb = Repository::<Exercise>::select_statement(Some(&Filter::ByName(hostile.clone())));
        let sql = qb.sql();
        assert!(sql.contains("name = $1"));
        assert!(!sql.contains(&hostile));
    }

    #[test]
    fn test_insert_statement_shape() {
        let payload = CreateExercise {
            name: "Bench press".to_string(),
            description: Some("Flat barbell press".to_string()),
            owner_id: 1,
        };
        let qb = Repository::<Exercise>::insert_statement(&payload);
        assert_eq!(
            qb.sql(),
            "INSERT INTO exercises (name, description, owner_id) VALUES ($1, $2, $3) \
             RETURNING id, name, description, owner_id, created_at, updated_at"
        );
    }

    #[test]
    fn test_update_binds_hostile_values_as_data() {
        // A payload full of SQL metacharacters must never alter statement
        // structure; it has to remain a bound parameter.
        let hostile = "O'Brien'; DROP TABLE x;--".to_string();
        let patch = ExercisePatch {
            name: Some(hostile.clone()),
            ..Default::default()
        };
        let qb = Repository::<Exercise>::update_statement(3, &patch);
        assert_eq!(
            qb.sql(),
            "UPDATE exercises SET name = $1, updated_at = now() WHERE id = $2 \
             RETURNING id, name, description, owner_id, created_at, updated_at"
        );
        assert!(!qb.sql().contains("DROP TABLE"));
    }

    #[test]
    fn test_update_with_multiple_fields() {
        let patch = ExercisePatch {
            name: Some("Deadlift".to_string()),
            description: Some("Conventional".to_string()),
            owner_id: None,
        };
        let qb = Repository::<Exercise>::update_statement(9, &patch);
        assert!(qb
            .sql()
            .starts_with("UPDATE exercises SET name = $1, description = $2, updated_at = now()"));
    }

    #[test]
    fn test_empty_patch_is_detected() {
        let patch = ExercisePatch::default();
        assert!(patch.is_empty());
        let full = ExercisePatch {
            description: Some("x".to_string()),
            ..Default::default()
        };
        assert!(!full.is_empty());
    }

    proptest::proptest! {
        // No name value, whatever it contains, may ever appear in the
        // statement text; it must always travel as a bound parameter.
        #[test]
        fn prop_names_never_leak_into_sql(name in ".{1,64}") {
            let qb = Repository::<Exercise>::select_statement(Some(&Filter::ByName(name.clone())));
            let sql = qb.sql();
            proptest::prop_assert_eq!(
                sql,
                "SELECT id, name, description, owner_id, created_at, updated_at \
                 FROM exercises WHERE name = $1 ORDER BY id ASC"
            );

            let patch = ExercisePatch {
                name: Some(name),
                ..Default::default()
            };
            let qb = Repository::<Exercise>::update_statement(1, &patch);
            proptest::prop_assert!(qb.sql().starts_with("UPDATE exercises SET name = $1"));
        }
    }
}
