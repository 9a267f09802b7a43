//! Storage layer: the ticket repository abstraction and its in-memory backend

mod filter;
mod memory;
mod repository;
mod users;

pub use filter::TicketFilter;
pub use memory::InMemoryTicketRepository;
pub use repository::TicketRepository;
pub use users::UserDirectory;
