//! Bearer token extraction
//!
//! `AuthUser` turns `Authorization: Bearer <token>` into an [`Actor`] or a
//! 401. Beyond the cryptographic check the extractor re-reads the user row,
//! so a deactivated account is locked out before its tokens expire.

use crate::auth::policy::Actor;
use crate::error::ApiError;
use crate::models::User;
use crate::repository::{Filter, Repository};
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Authenticated caller for protected routes.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Actor);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))?;

        let claims = state
            .jwt()
            .verify_access_token(token)
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;
        let user_id = claims
            .user_id()
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        // Fresh read per request: role changes and deactivation take effect
        // immediately, not at token expiry.
        let user = Repository::<User>::get_one(state.db(), &Filter::ById(user_id))
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::Unauthorized("User no longer exists".to_string()))?;

        if !user.is_active {
            return Err(ApiError::Unauthorized("Inactive user".to_string()));
        }

        Ok(AuthUser(Actor {
            user_id: user.id,
            is_admin: user.is_admin,
        }))
    }
}

impl AuthUser {
    pub fn actor(&self) -> &Actor {
        &self.0
    }
}
