//! ticket-desk - Ticket lifecycle management core
//!
//! This crate provides the domain and service layer of a ticket tracker:
//! - Ticket and User entities with validated fields
//! - A repository abstraction with an in-memory, insertion-ordered backend
//! - A service enforcing identifier assignment, partial updates and status changes
//!
//! Front ends (HTTP, CLI), persistence backends and authorization are left to
//! the embedding application; they call into [`service::TicketService`].

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

//! # Concurrent Safety
//!
//! Repositories are `Send + Sync`. Identifier sequence numbers are reserved
//! atomically by the repository, and the service serializes every
//! read-modify-write, so concurrent updates resolve as last-write-wins
//! without lost fields.
//!
//! # Example
//!
//! ```rust
//! use ticket_desk::service::{NewTicket, TicketService, TicketUpdate};
//! use ticket_desk::storage::{InMemoryTicketRepository, TicketFilter};
//! use ticket_desk::core::{Priority, Status};
//!
//! let service = TicketService::new(InMemoryTicketRepository::new());
//!
//! let ticket = service.create_ticket(
//!     NewTicket::new("Fix bug").description("NPE on login"),
//! )?;
//! assert_eq!(ticket.status(), Status::ToDo);
//!
//! service.update_ticket(ticket.ticket_id(), TicketUpdate::new().priority(Priority::High))?;
//! let todo = service.list_tickets(&TicketFilter::new().with_status(Status::ToDo));
//! assert_eq!(todo.len(), 1);
//! # Ok::<(), ticket_desk::TicketError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
mod payload;
pub mod service;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, TicketError};
