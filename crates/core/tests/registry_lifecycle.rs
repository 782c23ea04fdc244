//! Ticket registry lifecycle integration tests.
//!
//! These tests drive the registry through its public API only:
//! - Full waiting -> called -> served scenarios
//! - Number-addressed calls that keep the rest of the line in order
//! - Concurrent creation and calling from many threads

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use counterline_core::{QueueError, Ticket, TicketRegistry, TicketStatus};

fn numbers(tickets: &[Ticket]) -> Vec<u64> {
    tickets.iter().map(Ticket::number).collect()
}

#[test]
fn test_call_peek_serve_scenario() {
    let registry = TicketRegistry::new();
    for expected in 1..=3 {
        assert_eq!(registry.create_ticket().number(), expected);
    }

    let called = registry.call_next().expect("a waiting ticket");
    assert_eq!(called.number(), 1);
    assert_eq!(called.status(), TicketStatus::Called);

    assert_eq!(registry.peek().unwrap().number(), 2);

    let served = registry.serve_next().expect("a called ticket");
    assert_eq!(served.number(), 1);
    assert_eq!(served.status(), TicketStatus::Served);
    assert_eq!(served.called_at(), called.called_at());

    assert!(registry.serve_next().is_none());
}

#[test]
fn test_call_by_number_keeps_line_order() {
    let registry = TicketRegistry::new();
    for _ in 0..3 {
        registry.create_ticket();
    }

    assert!(registry.call_by_number(2));
    assert_eq!(numbers(&registry.waiting()), vec![1, 3]);
    assert_eq!(numbers(&registry.called()), vec![2]);

    // Head operations continue from the remaining line
    assert_eq!(registry.call_next().unwrap().number(), 1);
    assert_eq!(registry.call_next().unwrap().number(), 3);
    assert!(registry.call_next().is_none());
    assert_eq!(numbers(&registry.called()), vec![2, 1, 3]);
}

#[test]
fn test_fresh_registry_head_operations_fail() {
    let registry = TicketRegistry::new();
    assert_eq!(registry.peek().unwrap_err(), QueueError::EmptyQueue);
    assert_eq!(registry.dequeue().unwrap_err(), QueueError::EmptyQueue);
    assert_eq!(QueueError::EmptyQueue.to_string(), "Queue is empty");
}

#[test]
fn test_served_tickets_stay_put() {
    let registry = TicketRegistry::new();
    for _ in 0..4 {
        registry.create_ticket();
    }
    while registry.call_next().is_some() {}
    while registry.serve_next().is_some() {}

    let served = registry.served();
    assert_eq!(numbers(&served), vec![1, 2, 3, 4]);
    assert!(served.iter().all(|t| {
        t.status() == TicketStatus::Served
            && t.created_at() <= t.called_at().unwrap()
            && t.called_at().unwrap() <= t.served_at().unwrap()
    }));
    assert_eq!(numbers(&registry.all()), vec![1, 2, 3, 4]);
    assert!(!registry.serve_by_number(1));
    assert!(!registry.call_by_number(1));
}

#[test]
fn test_status_matches_collection() {
    let registry = TicketRegistry::new();
    for _ in 0..6 {
        registry.create_ticket();
    }
    registry.call_by_number(5);
    registry.call_next();
    registry.call_by_number(3);
    registry.serve_by_number(1);

    assert!(registry
        .waiting()
        .iter()
        .all(|t| t.status() == TicketStatus::Waiting && t.called_at().is_none()));
    assert!(registry
        .called()
        .iter()
        .all(|t| t.status() == TicketStatus::Called
            && t.called_at().is_some()
            && t.served_at().is_none()));
    assert!(registry
        .served()
        .iter()
        .all(|t| t.status() == TicketStatus::Served && t.served_at().is_some()));

    let stats = registry.stats();
    assert_eq!((stats.waiting, stats.called, stats.served), (3, 2, 1));
    assert_eq!(stats.total, 6);
}

#[test]
fn test_concurrent_creation_yields_unique_numbers() {
    let registry = Arc::new(TicketRegistry::new());
    let threads = 8;
    let per_thread = 250;

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                (0..per_thread)
                    .map(|_| registry.create_ticket().number())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for number in handle.join().unwrap() {
            assert!(seen.insert(number), "duplicate ticket number {number}");
        }
    }

    let total = (threads * per_thread) as u64;
    assert_eq!(seen.len() as u64, total);
    assert_eq!(seen.iter().copied().max(), Some(total));
    assert_eq!(seen.iter().copied().min(), Some(1));

    // The waiting line is ordered by number even with racing creators
    let waiting = numbers(&registry.waiting());
    assert!(waiting.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_concurrent_calls_never_duplicate() {
    let registry = Arc::new(TicketRegistry::new());
    for _ in 0..500 {
        registry.create_ticket();
    }

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let mut called = Vec::new();
                while let Some(ticket) = registry.call_next() {
                    called.push(ticket.number());
                }
                called
            })
        })
        .collect();

    let mut all_called: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    all_called.sort_unstable();

    assert_eq!(all_called, (1..=500).collect::<Vec<_>>());
    assert!(registry.is_empty());
    assert_eq!(registry.called().len(), 500);
}
