//! Exercise entity

use chrono::{DateTime, Utc};
use sqlx::query_builder::Separated;
use sqlx::Postgres;

use crate::auth::policy::{Governed, Ownership};
use crate::repository::{Entity, InsertPayload, UpdatePatch};

/// Exercise record. Owned by the user who created it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Exercise {
    const TABLE: &'static str = "exercises";
    const KIND: &'static str = "Exercise";
    const COLUMNS: &'static str = "id, name, description, owner_id, created_at, updated_at";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Governed for Exercise {
    fn ownership(&self) -> Ownership {
        Ownership::OwnedBy(self.owner_id)
    }
}

/// Insert shape for exercises. `owner_id` is stamped by the service from the
/// authenticated actor, never taken from the request body.
#[derive(Debug, Clone)]
pub struct CreateExercise {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

impl InsertPayload<Exercise> for CreateExercise {
    const INSERT_COLUMNS: &'static [&'static str] = &["name", "description", "owner_id"];

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.name.clone())
            .push_bind(self.description.clone())
            .push_bind(self.owner_id);
    }
}

/// Partial update for exercises. `owner_id` reassignment is admin-only and
/// is gated in the service layer before this patch is applied.
#[derive(Debug, Clone, Default)]
pub struct ExercisePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<i64>,
}

impl UpdatePatch<Exercise> for ExercisePatch {
    fn push_assignments(&self, assignments: &mut Separated<'_, '_, Postgres, &'static str>) {
        if let Some(name) = &self.name {
            assignments.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(description) = &self.description {
            assignments
                .push("description = ")
                .push_bind_unseparated(description.clone());
        }
        if let Some(owner_id) = self.owner_id {
            assignments
                .push("owner_id = ")
                .push_bind_unseparated(owner_id);
        }
    }

    fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.owner_id.is_none()
    }
}
