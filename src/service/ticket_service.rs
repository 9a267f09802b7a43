use super::{Clock, NewTicket, SystemClock, TicketStats, TicketUpdate};
use crate::config::Config;
use crate::core::{Status, Ticket, TicketBuilder, TicketId, User, UserId, validate_text};
use crate::error::{Result, TicketError};
use crate::storage::{InMemoryTicketRepository, TicketFilter, TicketRepository, UserDirectory};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Business-rule layer over a ticket repository
///
/// The only component that constructs or mutates tickets. All
/// read-modify-write operations run under one lock, so concurrent callers
/// targeting the same ticket are serialized and the last committed write
/// wins.
pub struct TicketService<R = InMemoryTicketRepository, C = SystemClock> {
    repository: R,
    users: UserDirectory,
    clock: C,
    config: Config,
    write_lock: Mutex<()>,
}

impl<R: TicketRepository> TicketService<R, SystemClock> {
    /// Service with the wall clock and default configuration
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            users: UserDirectory::new(),
            clock: SystemClock,
            config: Config::default(),
            write_lock: Mutex::new(()),
        }
    }
}

impl<R: TicketRepository, C: Clock> TicketService<R, C> {
    /// Service with an explicit clock and configuration
    pub fn with_config(repository: R, clock: C, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            repository,
            users: UserDirectory::new(),
            clock,
            config,
            write_lock: Mutex::new(()),
        })
    }

    /// Underlying ticket storage
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Registered users and their ticket links
    pub const fn users(&self) -> &UserDirectory {
        &self.users
    }

    /// Configuration the service was built with
    pub const fn config(&self) -> &Config {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make a user available for ticket links
    pub fn register_user(&self, user: User) -> Result<User> {
        let user = self.users.register(user)?;
        tracing::info!("Registered user {} ({})", user.user_id(), user.role());
        Ok(user)
    }

    pub fn get_user(&self, id: &UserId) -> Option<User> {
        self.users.get(id)
    }

    /// Validate `request`, assign an id and store the new ticket
    pub fn create_ticket(&self, request: NewTicket) -> Result<Ticket> {
        self.try_create(request).inspect_err(|e| {
            tracing::warn!("Rejected ticket creation: {}", e);
        })
    }

    fn try_create(&self, request: NewTicket) -> Result<Ticket> {
        let description = match request.description {
            Some(description) => description,
            None => self
                .config
                .description_placeholder
                .clone()
                .ok_or_else(|| TicketError::validation("description", "is required"))?,
        };
        validate_text("title", &request.title)?;
        validate_text("description", &description)?;

        let _guard = self.lock();
        if let Some(user) = &request.created_by {
            self.users.ensure_known("created_by", user)?;
        }
        if let Some(user) = &request.assignee_id {
            self.users.ensure_known("assignee_id", user)?;
        }

        let sequence = self.repository.next_sequence().ok_or_else(|| {
            TicketError::validation("ticket_id", "identifier sequence is exhausted")
        })?;
        let now = self.clock.now();
        let ticket_id = TicketId::generate(&self.config.id_prefix, now.date_naive(), sequence);

        let mut builder = TicketBuilder::new()
            .id(ticket_id)
            .title(request.title)
            .description(description)
            .created_at(now)
            .created_by(request.created_by)
            .assigned_to(request.assignee_id);
        if let Some(status) = request.status {
            builder = builder.status(status);
        }
        if let Some(priority) = request.priority {
            builder = builder.priority(priority);
        }
        if let Some(is_open) = request.is_open {
            builder = builder.open(is_open);
        }

        let ticket = self.repository.save(builder.build()?);
        if let Some(user) = ticket.created_by() {
            self.users.record_created(user, ticket.ticket_id());
        }
        self.users
            .record_assignment(ticket.ticket_id(), None, ticket.assigned_to());

        tracing::info!(
            "Created ticket {} '{}' ({}, {})",
            ticket.ticket_id(),
            ticket.title(),
            ticket.status(),
            ticket.priority()
        );
        Ok(ticket)
    }

    /// Look up a ticket; `None` when the id is unknown
    pub fn get_ticket(&self, id: &TicketId) -> Option<Ticket> {
        let ticket = self.repository.find_by_id(id);
        if ticket.is_none() {
            tracing::debug!("Ticket {} not found", id);
        }
        ticket
    }

    /// Tickets matching `filter`, in insertion order
    pub fn list_tickets(&self, filter: &TicketFilter) -> Vec<Ticket> {
        let tickets = self.repository.find_by_filters(filter);
        tracing::debug!("Listed {} tickets for {:?}", tickets.len(), filter);
        tickets
    }

    /// Same as [`Self::list_tickets`], most urgent first
    ///
    /// Tickets of equal priority keep their insertion order.
    pub fn list_tickets_by_priority(&self, filter: &TicketFilter) -> Vec<Ticket> {
        let mut tickets = self.list_tickets(filter);
        tickets.sort_by(|a, b| b.priority().cmp(&a.priority()));
        tickets
    }

    /// Apply the fields present in `update`
    ///
    /// Returns `Ok(None)` for an unknown id. Validation failures leave the
    /// stored ticket untouched.
    pub fn update_ticket(&self, id: &TicketId, update: TicketUpdate) -> Result<Option<Ticket>> {
        let _guard = self.lock();
        let Some(mut ticket) = self.repository.find_by_id(id) else {
            tracing::debug!("Update skipped, ticket {} not found", id);
            return Ok(None);
        };
        if update.is_empty() {
            return Ok(Some(ticket));
        }

        if let Some(Some(user)) = &update.assignee_id {
            self.users.ensure_known("assignee_id", user)?;
        }
        let previous_assignee = ticket.assigned_to().cloned();

        if let Some(title) = update.title {
            ticket.set_title(title)?;
        }
        if let Some(description) = update.description {
            ticket.set_description(description)?;
        }
        if let Some(status) = update.status {
            ticket.set_status(status);
        }
        if let Some(priority) = update.priority {
            ticket.set_priority(priority);
        }
        if let Some(is_open) = update.is_open {
            ticket.set_open(is_open);
        }
        if let Some(assignee) = update.assignee_id {
            ticket.set_assigned_to(assignee);
        }
        ticket.touch(self.clock.now());

        let ticket = self.repository.save(ticket);
        self.users.record_assignment(
            ticket.ticket_id(),
            previous_assignee.as_ref(),
            ticket.assigned_to(),
        );
        tracing::debug!("Updated ticket {}", ticket.ticket_id());
        Ok(Some(ticket))
    }

    /// Set the status unconditionally; any status may follow any other
    pub fn change_status(&self, id: &TicketId, status: Status) -> Option<Ticket> {
        let ticket = self.modify(id, |ticket| ticket.set_status(status))?;
        tracing::info!("Ticket {} status changed to {}", id, status);
        Some(ticket)
    }

    /// Move to the next workflow stage (`ToDo` to `InProgress` to `Done`)
    pub fn advance_status(&self, id: &TicketId) -> Option<Ticket> {
        let ticket = self.modify(id, |ticket| ticket.set_status(ticket.status().next()))?;
        tracing::info!("Ticket {} advanced to {}", id, ticket.status());
        Some(ticket)
    }

    /// Mark the ticket closed and done
    pub fn close_ticket(&self, id: &TicketId) -> Option<Ticket> {
        let ticket = self.modify(id, Ticket::close)?;
        tracing::info!("Closed ticket {}", id);
        Some(ticket)
    }

    /// Reopen the ticket; a done ticket returns to `ToDo`
    pub fn reopen_ticket(&self, id: &TicketId) -> Option<Ticket> {
        let ticket = self.modify(id, Ticket::reopen)?;
        tracing::info!("Reopened ticket {}", id);
        Some(ticket)
    }

    /// Assign the ticket to `user`, or clear the assignment with `None`
    pub fn assign_ticket(&self, id: &TicketId, user: Option<UserId>) -> Result<Option<Ticket>> {
        self.update_ticket(id, TicketUpdate::new().assignee(user))
    }

    /// Counts over the whole store
    pub fn statistics(&self) -> TicketStats {
        let now = self.clock.now();
        TicketStats::collect(
            &self.repository.find_all(),
            now,
            self.config.overdue_after_days,
        )
    }

    /// Load, mutate, refresh `updated_at` and store, all under the write lock
    fn modify(&self, id: &TicketId, f: impl FnOnce(&mut Ticket)) -> Option<Ticket> {
        let _guard = self.lock();
        let Some(mut ticket) = self.repository.find_by_id(id) else {
            tracing::debug!("Ticket {} not found", id);
            return None;
        };
        f(&mut ticket);
        ticket.touch(self.clock.now());
        Some(self.repository.save(ticket))
    }
}
