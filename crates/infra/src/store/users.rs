use chrono::Utc;

use quill_core::UserId;
use quill_domain::User;

use super::{Collection, StoreError};

/// Typed facade over the user collection.
#[derive(Debug, Default)]
pub struct UserStore {
    users: Collection<UserId, User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) -> Result<(), StoreError> {
        self.users.insert(user.id, user)
    }

    pub fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        self.users.get(id)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.find(|u| u.email == email)?.into_iter().next())
    }

    pub fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .find(|u| u.username == username)?
            .into_iter()
            .next())
    }

    /// Admin listing: every non-admin account, newest first.
    pub fn list_non_admin(&self) -> Result<Vec<User>, StoreError> {
        let mut users = self.users.find(|u| !u.is_admin)?;
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(users)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        self.users.count()
    }

    /// Atomically mutate a user record; stamps `updated_at`.
    pub fn update<F>(&self, id: &UserId, f: F) -> Result<Option<User>, StoreError>
    where
        F: FnOnce(&mut User),
    {
        self.users.update(id, |user| {
            f(user);
            user.updated_at = Utc::now();
        })
    }

    pub fn delete(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        self.users.remove(id)
    }
}
