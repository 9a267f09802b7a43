//! Test utilities for ticket-desk
//!
//! This module provides common test fixtures and utilities to reduce
//! duplication in test code across the codebase.

#![cfg(test)]

use crate::core::{Priority, Status, Ticket, TicketBuilder, TicketId};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_FIXTURE: AtomicU64 = AtomicU64::new(1);

/// Timestamp shared by all fixture tickets
pub fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
}

/// Create a test ticket with a unique id and default values
pub fn create_test_ticket(title: &str, priority: Priority, status: Status) -> Ticket {
    let sequence = NEXT_FIXTURE.fetch_add(1, Ordering::Relaxed);
    let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    TicketBuilder::new()
        .id(TicketId::generate("tst", date, sequence))
        .title(title)
        .description(format!("Description for {title}"))
        .priority(priority)
        .status(status)
        .created_at(fixture_time())
        .build()
        .expect("fixture ticket is valid")
}

/// Test data builder for complex scenarios
pub struct TestDataBuilder {
    tickets: Vec<Ticket>,
}

impl TestDataBuilder {
    pub fn new() -> Self {
        Self {
            tickets: Vec::new(),
        }
    }

    /// Add a ticket with specific properties
    pub fn with_ticket(mut self, title: &str, priority: Priority, status: Status) -> Self {
        self.tickets
            .push(create_test_ticket(title, priority, status));
        self
    }

    /// Add multiple tickets with the same status
    pub fn with_tickets_in_status(mut self, status: Status, count: usize) -> Self {
        for i in 1..=count {
            self.tickets.push(create_test_ticket(
                &format!("{status} ticket {i}"),
                Priority::Medium,
                status,
            ));
        }
        self
    }

    /// Build and return the tickets
    pub fn build(self) -> Vec<Ticket> {
        self.tickets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fixture_ids_are_unique() {
        let tickets = TestDataBuilder::new()
            .with_tickets_in_status(Status::ToDo, 5)
            .build();
        let ids: HashSet<_> = tickets.iter().map(|t| t.ticket_id().clone()).collect();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_data_builder() {
        let tickets = TestDataBuilder::new()
            .with_ticket("Bug fix", Priority::High, Status::ToDo)
            .with_tickets_in_status(Status::InProgress, 2)
            .build();

        assert_eq!(tickets.len(), 3);
        assert_eq!(tickets[0].title(), "Bug fix");
        assert_eq!(tickets[1].status(), Status::InProgress);
        assert_eq!(tickets[2].title(), "InProgress ticket 2");
    }
}
