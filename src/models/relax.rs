//! Relax activity and relax type entities

use chrono::{DateTime, Utc};
use sqlx::query_builder::Separated;
use sqlx::Postgres;

use crate::auth::policy::{Governed, Ownership};
use crate::repository::{Entity, InsertPayload, UpdatePatch};

/// Relax activity record, table `relax`. Owned; references a relax type.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RelaxActivity {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub relax_type_id: i64,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for RelaxActivity {
    const TABLE: &'static str = "relax";
    const KIND: &'static str = "Relax activity";
    const COLUMNS: &'static str =
        "id, name, description, relax_type_id, owner_id, created_at, updated_at";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Governed for RelaxActivity {
    fn ownership(&self) -> Ownership {
        Ownership::OwnedBy(self.owner_id)
    }
}

#[derive(Debug, Clone)]
pub struct CreateRelaxActivity {
    pub name: String,
    pub description: Option<String>,
    pub relax_type_id: i64,
    pub owner_id: i64,
}

impl InsertPayload<RelaxActivity> for CreateRelaxActivity {
    const INSERT_COLUMNS: &'static [&'static str] =
        &["name", "description", "relax_type_id", "owner_id"];

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.name.clone())
            .push_bind(self.description.clone())
            .push_bind(self.relax_type_id)
            .push_bind(self.owner_id);
    }
}

/// Partial update for relax activities. The allow-list gates creation only;
/// re-pointing `relax_type_id` later is not re-gated.
#[derive(Debug, Clone, Default)]
pub struct RelaxActivityPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub relax_type_id: Option<i64>,
}

impl UpdatePatch<RelaxActivity> for RelaxActivityPatch {
    fn push_assignments(&self, assignments: &mut Separated<'_, '_, Postgres, &'static str>) {
        if let Some(name) = &self.name {
            assignments.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(description) = &self.description {
            assignments
                .push("description = ")
                .push_bind_unseparated(description.clone());
        }
        if let Some(relax_type_id) = self.relax_type_id {
            assignments
                .push("relax_type_id = ")
                .push_bind_unseparated(relax_type_id);
        }
    }

    fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.relax_type_id.is_none()
    }
}

/// Relax type record. Not owned by anyone; who may manage it is a policy
/// configuration choice.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RelaxType {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for RelaxType {
    const TABLE: &'static str = "relax_types";
    const KIND: &'static str = "Relax type";
    const COLUMNS: &'static str = "id, name, created_at, updated_at";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Governed for RelaxType {
    fn ownership(&self) -> Ownership {
        Ownership::Public
    }
}

#[derive(Debug, Clone)]
pub struct CreateRelaxType {
    pub name: String,
}

impl InsertPayload<RelaxType> for CreateRelaxType {
    const INSERT_COLUMNS: &'static [&'static str] = &["name"];

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values.push_bind(self.name.clone());
    }
}

#[derive(Debug, Clone, Default)]
pub struct RelaxTypePatch {
    pub name: Option<String>,
}

impl UpdatePatch<RelaxType> for RelaxTypePatch {
    fn push_assignments(&self, assignments: &mut Separated<'_, '_, Postgres, &'static str>) {
        if let Some(name) = &self.name {
            assignments.push("name = ").push_bind_unseparated(name.clone());
        }
    }

    fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}
