//! User service: registration, login, token refresh, and admin management
//!
//! Registration relies on the store's unique constraint for email
//! uniqueness; there is no read-then-write window between check and insert.

use crate::auth::policy::{require_admin, Actor};
use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::models::{CreateUser, User, UserPatch};
use crate::repository::{Filter, Repository, RepositoryError};
use crate::services::resource::ResourceService;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use validator::ValidateEmail;

const MIN_PASSWORD_LEN: usize = 8;

/// Token pair returned by register/login/refresh.
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// User shape safe to return to callers; no password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            is_admin: user.is_admin,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Admin-side update input; plaintext password is hashed here before it
/// becomes a patch.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub is_admin: Option<bool>,
    pub is_active: Option<bool>,
}

pub struct UserService;

impl UserService {
    /// Register a new user and hand back a token pair.
    pub async fn register(
        pool: &PgPool,
        jwt: &JwtService,
        email: &str,
        password: &str,
        full_name: Option<String>,
    ) -> Result<AuthTokens, ApiError> {
        if !email.validate_email() {
            return Err(ApiError::Validation("Invalid email format".to_string()));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let payload = CreateUser {
            email: email.to_string(),
            password_hash,
            full_name,
            is_admin: false,
        };
        let user = Repository::<User>::create(pool, &payload)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => {
                    ApiError::Conflict("Email already registered".to_string())
                }
                other => other.into(),
            })?;

        Self::issue_tokens(jwt, user.id)
    }

    /// Login with email and password.
    ///
    /// Wrong email and wrong password produce the same error, so callers
    /// cannot probe which addresses are registered.
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let user = Self::find_by_email(pool, email)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        if !user.is_active {
            return Err(ApiError::Unauthorized("Inactive user".to_string()));
        }

        let valid = PasswordService::verify_async(password.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;
        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        Self::issue_tokens(jwt, user.id)
    }

    /// Exchange a refresh token for a fresh pair. The user must still exist
    /// and be active.
    pub async fn refresh(
        pool: &PgPool,
        jwt: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthTokens, ApiError> {
        let claims = jwt
            .verify_refresh_token(refresh_token)
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;
        let user_id = claims
            .user_id()
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        let user = Repository::<User>::get_one(pool, &Filter::ById(user_id))
            .await?
            .ok_or_else(|| ApiError::Unauthorized("User no longer exists".to_string()))?;
        if !user.is_active {
            return Err(ApiError::Unauthorized("Inactive user".to_string()));
        }

        Self::issue_tokens(jwt, user.id)
    }

    /// Profile of the authenticated caller.
    pub async fn profile(pool: &PgPool, user_id: i64) -> Result<UserProfile, ApiError> {
        let user = ResourceService::<User>::fetch_by_id(pool, user_id).await?;
        Ok(user.into())
    }

    /// Admin: list all users.
    pub async fn list(
        pool: &PgPool,
        actor: &Actor,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<UserProfile>, ApiError> {
        require_admin(Some(actor))?;
        let users = ResourceService::<User>::list(pool, offset, limit).await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    /// Admin: fetch one user.
    pub async fn fetch_by_id(
        pool: &PgPool,
        id: i64,
        actor: &Actor,
    ) -> Result<UserProfile, ApiError> {
        require_admin(Some(actor))?;
        let user = ResourceService::<User>::fetch_by_id(pool, id).await?;
        Ok(user.into())
    }

    /// Admin: update role/active flags, profile fields, or password.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        input: UpdateUserInput,
        actor: &Actor,
    ) -> Result<UserProfile, ApiError> {
        if let Some(email) = &input.email {
            if !email.validate_email() {
                return Err(ApiError::Validation("Invalid email format".to_string()));
            }
        }
        let password_hash = match input.password {
            Some(password) => {
                if password.len() < MIN_PASSWORD_LEN {
                    return Err(ApiError::Validation(format!(
                        "Password must be at least {MIN_PASSWORD_LEN} characters"
                    )));
                }
                Some(
                    PasswordService::hash_async(password)
                        .await
                        .map_err(ApiError::Internal)?,
                )
            }
            None => None,
        };

        let patch = UserPatch {
            email: input.email,
            password_hash,
            full_name: input.full_name,
            is_admin: input.is_admin,
            is_active: input.is_active,
        };
        let user = ResourceService::<User>::update(pool, id, &patch, Some(actor)).await?;
        Ok(user.into())
    }

    /// Admin: delete a user. Users still owning records are protected by
    /// the restrict foreign keys and surface as Conflict.
    pub async fn delete(pool: &PgPool, id: i64, actor: &Actor) -> Result<(), ApiError> {
        ResourceService::<User>::delete(pool, id, Some(actor)).await
    }

    async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, full_name, is_admin, is_active,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }

    fn issue_tokens(jwt: &JwtService, user_id: i64) -> Result<AuthTokens, ApiError> {
        let access_token = jwt.issue_access_token(user_id).map_err(ApiError::Internal)?;
        let refresh_token = jwt
            .issue_refresh_token(user_id)
            .map_err(ApiError::Internal)?;
        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt.access_token_expiry_secs(),
        })
    }
}
