//! Concurrent access to a shared service

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use ticket_desk::config::Config;
use ticket_desk::core::{Priority, Status, TicketId};
use ticket_desk::service::{Clock, NewTicket, TicketService, TicketUpdate};
use ticket_desk::storage::{InMemoryTicketRepository, TicketRepository};

#[test]
fn test_concurrent_creation_yields_unique_ids() {
    let service = Arc::new(TicketService::new(InMemoryTicketRepository::new()));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                (0..25)
                    .map(|i| {
                        service
                            .create_ticket(
                                NewTicket::new(format!("worker {worker} ticket {i}"))
                                    .description("created concurrently"),
                            )
                            .unwrap()
                            .ticket_id()
                            .clone()
                    })
                    .collect::<Vec<TicketId>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id.clone()), "duplicate id {id}");
        }
    }
    assert_eq!(ids.len(), 200);
    assert_eq!(service.repository().count(), 200);
}

/// Clock that stalls on every read, widening the gap between loading a
/// ticket and saving it back
struct SlowClock;

impl Clock for SlowClock {
    fn now(&self) -> DateTime<Utc> {
        thread::sleep(Duration::from_millis(20));
        Utc::now()
    }
}

#[test]
fn test_concurrent_updates_do_not_lose_fields() {
    let service = Arc::new(
        TicketService::with_config(InMemoryTicketRepository::new(), SlowClock, Config::default())
            .unwrap(),
    );
    let ticket = service
        .create_ticket(NewTicket::new("shared").description("d"))
        .unwrap();
    let id = ticket.ticket_id().clone();

    let updates = vec![
        TicketUpdate::new().title("renamed"),
        TicketUpdate::new().description("rewritten"),
        TicketUpdate::new().priority(Priority::Critical),
        TicketUpdate::new().status(Status::Done),
        TicketUpdate::new().open(false),
    ];
    let barrier = Arc::new(Barrier::new(updates.len()));
    let handles: Vec<_> = updates
        .into_iter()
        .map(|update| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            let id = id.clone();
            thread::spawn(move || {
                barrier.wait();
                service.update_ticket(&id, update).unwrap().unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let final_ticket = service.get_ticket(&id).unwrap();
    assert_eq!(final_ticket.title(), "renamed");
    assert_eq!(final_ticket.description(), "rewritten");
    assert_eq!(final_ticket.priority(), Priority::Critical);
    assert_eq!(final_ticket.status(), Status::Done);
    assert!(!final_ticket.is_open());
    assert!(final_ticket.updated_at() >= ticket.updated_at());
}
