//! Authorization policy
//!
//! A single decision function answers "may this actor perform this action on
//! this target". Reads are public; every mutation needs an authenticated
//! actor; owned entities additionally require the owner or an admin.
//! The policy is always evaluated against a freshly fetched target, never a
//! cached one.

use crate::error::ApiError;

/// Caller identity resolved from a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub is_admin: bool,
}

/// The four things a caller can do to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

/// How a target entity is governed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// No owner; any authenticated actor may mutate it.
    Public,
    /// Owned by one user; only that user or an admin may mutate it.
    OwnedBy(i64),
    /// Administrative resource; only admins may mutate it.
    AdminManaged,
}

/// An entity that knows how it is governed.
pub trait Governed {
    fn ownership(&self) -> Ownership;
}

/// Core allow/deny decision.
pub fn can(actor: Option<&Actor>, action: Action, ownership: Ownership) -> bool {
    if action == Action::Read {
        return true;
    }
    let Some(actor) = actor else {
        return false;
    };
    match ownership {
        Ownership::Public => true,
        Ownership::OwnedBy(owner_id) => actor.is_admin || actor.user_id == owner_id,
        Ownership::AdminManaged => actor.is_admin,
    }
}

/// Decision plus the typed failure the service layer propagates: missing
/// actor is Unauthorized, a denied actor is Forbidden.
pub fn authorize(
    actor: Option<&Actor>,
    action: Action,
    ownership: Ownership,
) -> Result<(), ApiError> {
    let Some(actor) = actor else {
        return Err(ApiError::Unauthorized("Not authenticated".to_string()));
    };
    if can(Some(actor), action, ownership) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "Not permitted to {} this resource",
            action.verb()
        )))
    }
}

/// Shortcut for admin-only surfaces (user management, and relax type
/// management when the config flag restricts it).
pub fn require_admin(actor: Option<&Actor>) -> Result<(), ApiError> {
    authorize(actor, Action::Update, Ownership::AdminManaged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const OWNER: Actor = Actor {
        user_id: 1,
        is_admin: false,
    };
    const OTHER: Actor = Actor {
        user_id: 2,
        is_admin: false,
    };
    const ADMIN: Actor = Actor {
        user_id: 3,
        is_admin: true,
    };

    #[rstest]
    #[case(None)]
    #[case(Some(&OTHER))]
    #[case(Some(&ADMIN))]
    fn test_read_is_public(#[case] actor: Option<&Actor>) {
        assert!(can(actor, Action::Read, Ownership::OwnedBy(1)));
        assert!(can(actor, Action::Read, Ownership::Public));
        assert!(can(actor, Action::Read, Ownership::AdminManaged));
    }

    #[rstest]
    #[case(Action::Create)]
    #[case(Action::Update)]
    #[case(Action::Delete)]
    fn test_unauthenticated_mutations_denied(#[case] action: Action) {
        assert!(!can(None, action, Ownership::Public));
        assert!(!can(None, action, Ownership::OwnedBy(1)));
        assert!(!can(None, action, Ownership::AdminManaged));
    }

    #[test]
    fn test_owner_may_mutate_own_entity() {
        assert!(can(Some(&OWNER), Action::Update, Ownership::OwnedBy(1)));
        assert!(can(Some(&OWNER), Action::Delete, Ownership::OwnedBy(1)));
    }

    #[test]
    fn test_non_owner_denied() {
        assert!(!can(Some(&OTHER), Action::Update, Ownership::OwnedBy(1)));
        assert!(!can(Some(&OTHER), Action::Delete, Ownership::OwnedBy(1)));
    }

    #[test]
    fn test_admin_overrides_ownership() {
        assert!(can(Some(&ADMIN), Action::Update, Ownership::OwnedBy(1)));
        assert!(can(Some(&ADMIN), Action::Delete, Ownership::OwnedBy(1)));
    }

    #[test]
    fn test_admin_managed_rejects_regular_users() {
        assert!(!can(Some(&OWNER), Action::Update, Ownership::AdminManaged));
        assert!(can(Some(&ADMIN), Action::Delete, Ownership::AdminManaged));
    }

    #[test]
    fn test_authorize_maps_to_typed_errors() {
        let err = authorize(None, Action::Delete, Ownership::OwnedBy(1)).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));

        let err = authorize(Some(&OTHER), Action::Delete, Ownership::OwnedBy(1)).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        assert!(authorize(Some(&OWNER), Action::Delete, Ownership::OwnedBy(1)).is_ok());
    }
}
