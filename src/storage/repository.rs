use super::TicketFilter;
use crate::core::{Ticket, TicketId};
use std::sync::Arc;

/// Repository trait for ticket storage operations
///
/// This trait defines the interface for storing and querying tickets,
/// allowing for different storage implementations. It is pure data access:
/// nothing here validates or fails, and a miss is reported as `None` or an
/// empty result.
pub trait TicketRepository: Send + Sync {
    /// Inserts or overwrites the ticket keyed by its id and returns it
    fn save(&self, ticket: Ticket) -> Ticket;

    /// Exact-key lookup
    fn find_by_id(&self, id: &TicketId) -> Option<Ticket>;

    /// Tickets matching every criterion in `filter`, in insertion order
    fn find_by_filters(&self, filter: &TicketFilter) -> Vec<Ticket>;

    /// Number of stored tickets at the time of the call
    fn count(&self) -> usize;

    /// Reserves the next identifier sequence number
    ///
    /// Numbers are handed out exactly once, so two callers never receive the
    /// same value even if neither has saved its ticket yet. `None` once the
    /// sequence space is used up.
    fn next_sequence(&self) -> Option<u64>;

    /// Loads all tickets
    fn find_all(&self) -> Vec<Ticket> {
        self.find_by_filters(&TicketFilter::default())
    }

    /// Checks if a ticket exists by ID
    fn exists(&self, id: &TicketId) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Counts tickets matching a filter
    fn count_where(&self, filter: &TicketFilter) -> usize {
        self.find_by_filters(filter).len()
    }
}

impl<R> TicketRepository for Arc<R>
where
    R: TicketRepository + ?Sized,
{
    fn save(&self, ticket: Ticket) -> Ticket {
        (**self).save(ticket)
    }

    fn find_by_id(&self, id: &TicketId) -> Option<Ticket> {
        (**self).find_by_id(id)
    }

    fn find_by_filters(&self, filter: &TicketFilter) -> Vec<Ticket> {
        (**self).find_by_filters(filter)
    }

    fn count(&self) -> usize {
        (**self).count()
    }

    fn next_sequence(&self) -> Option<u64> {
        (**self).next_sequence()
    }

    fn count_where(&self, filter: &TicketFilter) -> usize {
        (**self).count_where(filter)
    }
}
