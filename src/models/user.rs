//! User entity

use chrono::{DateTime, Utc};
use sqlx::query_builder::Separated;
use sqlx::Postgres;

use crate::auth::policy::{Governed, Ownership};
use crate::repository::{Entity, InsertPayload, UpdatePatch};

/// User record. Carries the role and active flags the authorization policy
/// and the bearer extractor evaluate. `password_hash` never leaves the
/// service layer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for User {
    const TABLE: &'static str = "users";
    const KIND: &'static str = "User";
    const COLUMNS: &'static str =
        "id, email, password_hash, full_name, is_admin, is_active, created_at, updated_at";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Governed for User {
    fn ownership(&self) -> Ownership {
        Ownership::AdminManaged
    }
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub is_admin: bool,
}

impl InsertPayload<User> for CreateUser {
    const INSERT_COLUMNS: &'static [&'static str] =
        &["email", "password_hash", "full_name", "is_admin"];

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.email.clone())
            .push_bind(self.password_hash.clone())
            .push_bind(self.full_name.clone())
            .push_bind(self.is_admin);
    }
}

/// Partial update for users. The hash is produced by the service from a
/// plaintext password before the patch reaches the repository.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub is_admin: Option<bool>,
    pub is_active: Option<bool>,
}

impl UpdatePatch<User> for UserPatch {
    fn push_assignments(&self, assignments: &mut Separated<'_, '_, Postgres, &'static str>) {
        if let Some(email) = &self.email {
            assignments.push("email = ").push_bind_unseparated(email.clone());
        }
        if let Some(password_hash) = &self.password_hash {
            assignments
                .push("password_hash = ")
                .push_bind_unseparated(password_hash.clone());
        }
        if let Some(full_name) = &self.full_name {
            assignments
                .push("full_name = ")
                .push_bind_unseparated(full_name.clone());
        }
        if let Some(is_admin) = self.is_admin {
            assignments
                .push("is_admin = ")
                .push_bind_unseparated(is_admin);
        }
        if let Some(is_active) = self.is_active {
            assignments
                .push("is_active = ")
                .push_bind_unseparated(is_active);
        }
    }

    fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password_hash.is_none()
            && self.full_name.is_none()
            && self.is_admin.is_none()
            && self.is_active.is_none()
    }
}
