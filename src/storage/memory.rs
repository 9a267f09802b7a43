//! In-memory ticket storage
//!
//! Volatile by nature: contents live as long as the repository value. A JSON
//! snapshot can be exported and imported for hand-off between processes.

use super::{TicketFilter, TicketRepository};
use crate::core::{Ticket, TicketId};
use crate::error::{Result, TicketError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

struct Store {
    /// Tickets in insertion order
    tickets: Vec<Ticket>,
    /// Position of each ticket in `tickets`
    index: HashMap<TicketId, usize>,
    /// Next number to hand out; `u64::MAX` means exhausted
    next_sequence: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            tickets: Vec::new(),
            index: HashMap::new(),
            next_sequence: 1,
        }
    }
}

/// Serialized form of the whole store
#[derive(Serialize, Deserialize)]
struct Snapshot {
    tickets: Vec<Ticket>,
    next_sequence: u64,
}

/// Keyed in-memory store guarded by a single lock
#[derive(Default)]
pub struct InMemoryTicketRepository {
    store: RwLock<Store>,
}

impl std::fmt::Debug for InMemoryTicketRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.read();
        f.debug_struct("InMemoryTicketRepository")
            .field("tickets", &store.tickets.len())
            .field("next_sequence", &store.next_sequence)
            .finish()
    }
}

impl InMemoryTicketRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // The store holds no invariant a panicking writer could break halfway,
    // so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serialize every ticket plus the sequence counter
    pub fn export_json(&self) -> Result<String> {
        let store = self.read();
        let snapshot = Snapshot {
            tickets: store.tickets.clone(),
            next_sequence: store.next_sequence,
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Replace the contents with a snapshot produced by [`Self::export_json`]
    ///
    /// The snapshot is fully validated before anything is replaced. The
    /// sequence counter is moved past every imported id so new ids never
    /// collide with imported ones. Returns the number of imported tickets.
    pub fn import_json(&self, json: &str) -> Result<usize> {
        let snapshot: Snapshot = serde_json::from_str(json)?;

        let mut index = HashMap::with_capacity(snapshot.tickets.len());
        for (position, ticket) in snapshot.tickets.iter().enumerate() {
            if index.insert(ticket.ticket_id().clone(), position).is_some() {
                return Err(TicketError::validation(
                    "ticket_id",
                    format!("duplicate ticket id '{}' in snapshot", ticket.ticket_id()),
                ));
            }
        }

        let highest = snapshot
            .tickets
            .iter()
            .filter_map(|t| t.ticket_id().sequence())
            .max()
            .unwrap_or(0);
        let next_sequence = highest
            .checked_add(1)
            .map(|after_highest| snapshot.next_sequence.max(after_highest))
            .filter(|next| *next < u64::MAX)
            .ok_or_else(|| {
                TicketError::validation("next_sequence", "snapshot leaves no room for new ids")
            })?;

        let count = snapshot.tickets.len();
        *self.write() = Store {
            tickets: snapshot.tickets,
            index,
            next_sequence,
        };
        tracing::debug!("Imported {} tickets, next sequence {}", count, next_sequence);

        Ok(count)
    }
}

impl TicketRepository for InMemoryTicketRepository {
    fn save(&self, ticket: Ticket) -> Ticket {
        let mut store = self.write();
        if let Some(&position) = store.index.get(ticket.ticket_id()) {
            store.tickets[position] = ticket.clone();
        } else {
            let position = store.tickets.len();
            store.index.insert(ticket.ticket_id().clone(), position);
            store.tickets.push(ticket.clone());
        }
        ticket
    }

    fn find_by_id(&self, id: &TicketId) -> Option<Ticket> {
        let store = self.read();
        store
            .index
            .get(id)
            .map(|&position| store.tickets[position].clone())
    }

    fn find_by_filters(&self, filter: &TicketFilter) -> Vec<Ticket> {
        self.read()
            .tickets
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    fn count(&self) -> usize {
        self.read().tickets.len()
    }

    fn next_sequence(&self) -> Option<u64> {
        let mut store = self.write();
        let sequence = store.next_sequence;
        if sequence == u64::MAX {
            return None;
        }
        store.next_sequence = sequence + 1;
        Some(sequence)
    }

    fn count_where(&self, filter: &TicketFilter) -> usize {
        self.read().tickets.iter().filter(|t| filter.matches(t)).count()
    }
}
