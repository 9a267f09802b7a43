use crate::core::{TicketId, User, UserId};
use crate::error::{Result, TicketError};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Registry of known users
///
/// Holds the users tickets can be linked to, together with their
/// `tickets_created` / `tickets_assigned` back-references.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: RwLock<HashMap<UserId, User>>,
}

impl UserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user; ids must be unique
    pub fn register(&self, user: User) -> Result<User> {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        if users.contains_key(user.user_id()) {
            return Err(TicketError::DuplicateUser {
                id: user.user_id().to_string(),
            });
        }
        users.insert(user.user_id().clone(), user.clone());
        Ok(user)
    }

    #[must_use]
    pub fn get(&self, id: &UserId) -> Option<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    #[must_use]
    pub fn contains(&self, id: &UserId) -> bool {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fail with a validation error on `field` unless `id` is registered
    pub(crate) fn ensure_known(&self, field: &str, id: &UserId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(TicketError::validation(
                field,
                format!("unknown user '{id}'"),
            ))
        }
    }

    pub(crate) fn record_created(&self, user: &UserId, ticket: &TicketId) {
        self.with_user(user, |u| u.link_created(ticket));
    }

    /// Move the assignment back-reference from `old` to `new`
    pub(crate) fn record_assignment(
        &self,
        ticket: &TicketId,
        old: Option<&UserId>,
        new: Option<&UserId>,
    ) {
        if old == new {
            return;
        }
        if let Some(old) = old {
            self.with_user(old, |u| u.unlink_assigned(ticket));
        }
        if let Some(new) = new {
            self.with_user(new, |u| u.link_assigned(ticket));
        }
    }

    fn with_user(&self, id: &UserId, f: impl FnOnce(&mut User)) {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(user) = users.get_mut(id) {
            f(user);
        }
    }
}
