//! Pure authorization predicates.
//!
//! Every function here is a side-effect-free decision over the caller's
//! [`Identity`] and a resource's persisted owner id. Callers must pass the
//! owner field of a **freshly loaded** record — never an owner id taken from
//! a request body.

use quill_core::UserId;

use crate::Identity;

/// Moderators (admins) may act on any resource where a bypass exists.
pub fn can_moderate(identity: &Identity) -> bool {
    identity.is_admin
}

/// The caller owns the resource.
pub fn is_owner(identity: &Identity, owner: UserId) -> bool {
    identity.user_id == owner
}

/// Deletion: owner or moderator. Applies to posts, comments, and account
/// deletion.
pub fn can_delete(identity: &Identity, owner: UserId) -> bool {
    is_owner(identity, owner) || can_moderate(identity)
}

/// Content edits: owner only, deliberately without a moderator bypass.
/// Applies to post and comment edits and to profile updates.
pub fn can_edit(identity: &Identity, owner: UserId) -> bool {
    is_owner(identity, owner)
}

/// Route-level guard for endpoints addressing a target account: the account
/// itself or a moderator.
pub fn can_act_as(identity: &Identity, target: UserId) -> bool {
    identity.user_id == target || can_moderate(identity)
}
