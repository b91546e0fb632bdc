//! Route-level authorization guards.
//!
//! Thin wrappers over the pure policy predicates, called by handlers after
//! the target record has been loaded fresh from the store. Ownership is
//! always taken from that record, never from the request.

use quill_auth::{Identity, policy};
use quill_core::{CoreError, CoreResult, UserId};

/// Self-or-admin guard for routes addressing a target account id.
pub fn ensure_self_or_admin(identity: &Identity, target: UserId) -> CoreResult<()> {
    if policy::can_act_as(identity, target) {
        Ok(())
    } else {
        Err(CoreError::Forbidden)
    }
}

/// Owner-only guard (content edits, profile updates). No moderator bypass.
pub fn ensure_owner(identity: &Identity, owner: UserId) -> CoreResult<()> {
    if policy::can_edit(identity, owner) {
        Ok(())
    } else {
        Err(CoreError::Forbidden)
    }
}

/// Owner-or-admin guard (deletion).
pub fn ensure_owner_or_admin(identity: &Identity, owner: UserId) -> CoreResult<()> {
    if policy::can_delete(identity, owner) {
        Ok(())
    } else {
        Err(CoreError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guards_map_denial_to_forbidden() {
        let caller = Identity::new(UserId::new(), false);
        let other = UserId::new();

        assert_eq!(ensure_owner(&caller, other), Err(CoreError::Forbidden));
        assert_eq!(
            ensure_owner_or_admin(&caller, other),
            Err(CoreError::Forbidden)
        );
        assert_eq!(
            ensure_self_or_admin(&caller, other),
            Err(CoreError::Forbidden)
        );
        assert!(ensure_owner(&caller, caller.user_id).is_ok());
    }
}
