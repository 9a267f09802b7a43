//! Service layer: lifecycle rules on top of the repository

mod clock;
mod requests;
mod stats;
mod ticket_service;

#[cfg(test)]
pub(crate) use clock::MockClock;
pub use clock::{Clock, FixedClock, SystemClock};
pub use requests::{NewTicket, TicketUpdate};
pub use stats::TicketStats;
pub use ticket_service::TicketService;
