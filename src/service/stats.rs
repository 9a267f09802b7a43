use crate::core::{Priority, Status, Ticket};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Summary counts over a set of tickets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    pub overdue: usize,
    /// Every status is present, including those with a zero count
    pub by_status: HashMap<Status, usize>,
    /// Every priority is present, including those with a zero count
    pub by_priority: HashMap<Priority, usize>,
}

impl TicketStats {
    pub(crate) fn collect(tickets: &[Ticket], now: DateTime<Utc>, overdue_after_days: i64) -> Self {
        let mut by_status: HashMap<_, _> = Status::ALL.iter().map(|s| (*s, 0)).collect();
        let mut by_priority: HashMap<_, _> = Priority::ALL.iter().map(|p| (*p, 0)).collect();
        let mut open = 0;
        let mut overdue = 0;

        for ticket in tickets {
            *by_status.entry(ticket.status()).or_default() += 1;
            *by_priority.entry(ticket.priority()).or_default() += 1;
            if ticket.is_open() {
                open += 1;
            }
            if ticket.is_overdue(now, overdue_after_days) {
                overdue += 1;
            }
        }

        Self {
            total: tickets.len(),
            open,
            closed: tickets.len() - open,
            overdue,
            by_status,
            by_priority,
        }
    }

    #[must_use]
    pub fn count_by_status(&self, status: Status) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn count_by_priority(&self, priority: Priority) -> usize {
        self.by_priority.get(&priority).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestDataBuilder, create_test_ticket};
    use chrono::Duration;

    #[test]
    fn test_collect() {
        let mut tickets = TestDataBuilder::new()
            .with_ticket("a", Priority::High, Status::ToDo)
            .with_ticket("b", Priority::High, Status::InProgress)
            .with_tickets_in_status(Status::Done, 2)
            .build();
        let mut closed = create_test_ticket("c", Priority::Low, Status::Done);
        closed.close();
        tickets.push(closed);

        let now = tickets[0].created_at() + Duration::days(10);
        let stats = TicketStats::collect(&tickets, now, 7);

        assert_eq!(stats.total, 5);
        assert_eq!(stats.open, 4);
        assert_eq!(stats.closed, 1);
        assert_eq!(stats.overdue, 4);
        assert_eq!(stats.count_by_status(Status::Done), 3);
        assert_eq!(stats.count_by_status(Status::ToDo), 1);
        assert_eq!(stats.count_by_priority(Priority::High), 2);
        assert_eq!(stats.count_by_priority(Priority::Critical), 0);
    }

    #[test]
    fn test_serializes_with_canonical_keys() {
        let stats = TicketStats::collect(&[], Utc::now(), 7);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["total"], 0);
        assert_eq!(value["by_status"]["InProgress"], 0);
        assert_eq!(value["by_priority"]["Critical"], 0);
    }
}
