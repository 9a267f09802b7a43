use super::{Role, TicketId, UserId};
use crate::error::{Result, TicketError};
use serde::{Deserialize, Serialize};

/// An actor who can create tickets or have them assigned
///
/// `tickets_created` and `tickets_assigned` are back-references maintained by
/// the service when it links a ticket to a user. They are not serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserRecord")]
pub struct User {
    user_id: UserId,
    name: String,
    email: String,
    role: Role,
    #[serde(skip)]
    tickets_created: Vec<TicketId>,
    #[serde(skip)]
    tickets_assigned: Vec<TicketId>,
}

/// Wire form of a user, validated on the way in
#[derive(Deserialize)]
struct UserRecord {
    user_id: UserId,
    name: String,
    email: String,
    #[serde(default)]
    role: Role,
}

impl TryFrom<UserRecord> for User {
    type Error = TicketError;

    fn try_from(record: UserRecord) -> Result<Self> {
        Self::new(record.user_id, record.name, record.email, record.role)
    }
}

impl User {
    /// Create a user, rejecting an empty name or an email without `@`
    pub fn new(
        user_id: impl Into<UserId>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Result<Self> {
        let user_id = user_id.into();
        let name = name.into();
        let email = email.into();

        if user_id.as_str().trim().is_empty() {
            return Err(TicketError::validation("user_id", "must not be empty"));
        }
        if name.trim().is_empty() {
            return Err(TicketError::validation("name", "must not be empty"));
        }
        if !email.contains('@') {
            return Err(TicketError::validation(
                "email",
                format!("'{email}' is not a valid email address"),
            ));
        }

        Ok(Self {
            user_id,
            name,
            email,
            role,
            tickets_created: Vec::new(),
            tickets_assigned: Vec::new(),
        })
    }

    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Change the role. Deciding who may do this is up to the caller.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Tickets this user created
    #[must_use]
    pub fn tickets_created(&self) -> &[TicketId] {
        &self.tickets_created
    }

    /// Tickets currently assigned to this user
    #[must_use]
    pub fn tickets_assigned(&self) -> &[TicketId] {
        &self.tickets_assigned
    }

    pub(crate) fn link_created(&mut self, ticket_id: &TicketId) {
        if !self.tickets_created.contains(ticket_id) {
            self.tickets_created.push(ticket_id.clone());
        }
    }

    pub(crate) fn link_assigned(&mut self, ticket_id: &TicketId) {
        if !self.tickets_assigned.contains(ticket_id) {
            self.tickets_assigned.push(ticket_id.clone());
        }
    }

    pub(crate) fn unlink_assigned(&mut self, ticket_id: &TicketId) {
        self.tickets_assigned.retain(|id| id != ticket_id);
    }
}
