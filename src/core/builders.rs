use super::{Priority, Status, Ticket, TicketId, UserId};
use crate::error::{Result, TicketError};
use chrono::{DateTime, Utc};

/// Builder for creating Ticket instances
///
/// `build` runs the same validation as every other ticket mutation, so a
/// ticket is either fully valid or not constructed at all.
#[derive(Default)]
pub(crate) struct TicketBuilder {
    id: Option<TicketId>,
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    is_open: Option<bool>,
    created_at: Option<DateTime<Utc>>,
    created_by: Option<UserId>,
    assigned_to: Option<UserId>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticket ID
    #[must_use]
    pub fn id(mut self, id: TicketId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn open(mut self, is_open: bool) -> Self {
        self.is_open = Some(is_open);
        self
    }

    /// Set `created_at` (and the initial `updated_at`)
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[must_use]
    pub fn created_by(mut self, user: Option<UserId>) -> Self {
        self.created_by = user;
        self
    }

    #[must_use]
    pub fn assigned_to(mut self, user: Option<UserId>) -> Self {
        self.assigned_to = user;
        self
    }

    /// Build the ticket
    pub fn build(self) -> Result<Ticket> {
        let id = self
            .id
            .ok_or_else(|| TicketError::validation("ticket_id", "must be assigned"))?;
        let mut ticket = Ticket::new(
            id,
            self.title.unwrap_or_default(),
            self.description.unwrap_or_default(),
            self.status.unwrap_or_default(),
            self.priority.unwrap_or_default(),
            self.is_open.unwrap_or(true),
            self.created_at.unwrap_or_else(Utc::now),
        )?;
        ticket.set_created_by(self.created_by);
        ticket.set_assigned_to(self.assigned_to);
        Ok(ticket)
    }
}
