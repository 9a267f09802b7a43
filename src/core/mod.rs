//! Core domain types: enumerations, identifiers, tickets and users

mod builders;
mod enums;
mod id;
mod ticket;
mod user;

pub(crate) use builders::TicketBuilder;
pub use enums::{Priority, Role, Status};
pub use id::{TicketId, UserId};
pub use ticket::Ticket;
pub(crate) use ticket::validate_text;
pub use user::User;
