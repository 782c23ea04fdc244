//! In-memory ticket registry.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::debug;

use super::{QueueError, QueueStats, Ticket, TicketStatus};
use crate::metrics::TICKET_TRANSITIONS;

/// Collections and counter guarded together as one unit.
#[derive(Debug)]
struct Queues {
    waiting: VecDeque<Ticket>,
    called: VecDeque<Ticket>,
    served: Vec<Ticket>,
    next_number: u64,
}

impl Queues {
    fn new() -> Self {
        Self {
            waiting: VecDeque::new(),
            called: VecDeque::new(),
            served: Vec::new(),
            next_number: 1,
        }
    }
}

/// Owner of every ticket and of the `waiting -> called -> served` state machine.
///
/// Each collection keeps insertion order. Every operation runs under a single
/// lock, so number assignment and find-remove-append sequences are atomic with
/// respect to each other. Callers only ever get clones.
#[derive(Debug)]
pub struct TicketRegistry {
    queues: Mutex<Queues>,
}

impl Default for TicketRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketRegistry {
    /// Create an empty registry. Numbering starts at 1.
    pub fn new() -> Self {
        Self {
            queues: Mutex::new(Queues::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Queues> {
        // A poisoned lock means an earlier operation panicked halfway through.
        self.queues.lock().expect("ticket registry lock poisoned")
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Allocate the next number and append a new `Waiting` ticket.
    pub fn create_ticket(&self) -> Ticket {
        let mut queues = self.lock();
        let number = queues.next_number;
        queues.next_number += 1;

        let ticket = Ticket::new(number, Utc::now());
        queues.waiting.push_back(ticket.clone());
        drop(queues);

        TICKET_TRANSITIONS.with_label_values(&["created"]).inc();
        debug!(number, "Ticket created");
        ticket
    }

    // ========================================================================
    // Head operations
    // ========================================================================

    /// Call the oldest waiting ticket.
    ///
    /// Returns `None` when nobody is waiting.
    pub fn call_next(&self) -> Option<Ticket> {
        let mut queues = self.lock();
        let mut ticket = queues.waiting.pop_front()?;
        ticket.set_status(TicketStatus::Called, Utc::now());
        queues.called.push_back(ticket.clone());
        drop(queues);

        record_transition(&ticket);
        Some(ticket)
    }

    /// Serve the oldest called ticket.
    ///
    /// Returns `None` when no ticket has been called.
    pub fn serve_next(&self) -> Option<Ticket> {
        let mut queues = self.lock();
        let mut ticket = queues.called.pop_front()?;
        ticket.set_status(TicketStatus::Served, Utc::now());
        queues.served.push(ticket.clone());
        drop(queues);

        record_transition(&ticket);
        Some(ticket)
    }

    /// Oldest waiting ticket, without removing it.
    pub fn peek(&self) -> Result<Ticket, QueueError> {
        self.lock()
            .waiting
            .front()
            .cloned()
            .ok_or(QueueError::EmptyQueue)
    }

    /// Remove and return the oldest waiting ticket without calling it.
    ///
    /// The ticket leaves the registry entirely. Its number is not reused.
    pub fn dequeue(&self) -> Result<Ticket, QueueError> {
        let ticket = self
            .lock()
            .waiting
            .pop_front()
            .ok_or(QueueError::EmptyQueue)?;

        TICKET_TRANSITIONS.with_label_values(&["dequeued"]).inc();
        debug!(number = ticket.number(), "Ticket dequeued");
        Ok(ticket)
    }

    // ========================================================================
    // Number-addressed operations
    // ========================================================================

    /// Call the waiting ticket with the given number, wherever it sits in the line.
    ///
    /// Returns `false` if that number is not currently waiting.
    pub fn call_by_number(&self, number: u64) -> bool {
        let mut queues = self.lock();
        let Some(mut ticket) = take_by_number(&mut queues.waiting, number) else {
            return false;
        };
        ticket.set_status(TicketStatus::Called, Utc::now());
        queues.called.push_back(ticket.clone());
        drop(queues);

        record_transition(&ticket);
        true
    }

    /// Serve the called ticket with the given number.
    ///
    /// Returns `false` if that number is not currently called.
    pub fn serve_by_number(&self, number: u64) -> bool {
        let mut queues = self.lock();
        let Some(mut ticket) = take_by_number(&mut queues.called, number) else {
            return false;
        };
        ticket.set_status(TicketStatus::Served, Utc::now());
        queues.served.push(ticket.clone());
        drop(queues);

        record_transition(&ticket);
        true
    }

    /// Look up a ticket by number in any collection.
    pub fn find(&self, number: u64) -> Option<Ticket> {
        let queues = self.lock();
        queues
            .waiting
            .iter()
            .chain(queues.called.iter())
            .chain(queues.served.iter())
            .find(|t| t.number() == number)
            .cloned()
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    /// Number of waiting tickets.
    pub fn size(&self) -> usize {
        self.lock().waiting.len()
    }

    /// True when no ticket is waiting.
    pub fn is_empty(&self) -> bool {
        self.lock().waiting.is_empty()
    }

    /// Copy of the waiting line, oldest first.
    pub fn waiting(&self) -> Vec<Ticket> {
        self.lock().waiting.iter().cloned().collect()
    }

    /// Copy of the called tickets, in call order.
    pub fn called(&self) -> Vec<Ticket> {
        self.lock().called.iter().cloned().collect()
    }

    /// Copy of the served tickets, in serve order.
    pub fn served(&self) -> Vec<Ticket> {
        self.lock().served.clone()
    }

    /// Copy of every ticket: waiting, then called, then served.
    pub fn all(&self) -> Vec<Ticket> {
        let queues = self.lock();
        let mut all =
            Vec::with_capacity(queues.waiting.len() + queues.called.len() + queues.served.len());
        all.extend(queues.waiting.iter().cloned());
        all.extend(queues.called.iter().cloned());
        all.extend(queues.served.iter().cloned());
        all
    }

    /// Collection sizes read under one lock.
    pub fn stats(&self) -> QueueStats {
        let queues = self.lock();
        let waiting = queues.waiting.len();
        let called = queues.called.len();
        let served = queues.served.len();
        QueueStats {
            waiting,
            called,
            served,
            total: waiting + called + served,
            next_number: queues.next_number,
        }
    }
}

/// Remove the first ticket with `number`, keeping the order of the rest.
fn take_by_number(queue: &mut VecDeque<Ticket>, number: u64) -> Option<Ticket> {
    let idx = queue.iter().position(|t| t.number() == number)?;
    queue.remove(idx)
}

fn record_transition(ticket: &Ticket) {
    let label = match ticket.status() {
        TicketStatus::Waiting => return,
        TicketStatus::Called => "called",
        TicketStatus::Served => "served",
    };
    TICKET_TRANSITIONS.with_label_values(&[label]).inc();
    debug!(number = ticket.number(), status = %ticket.status(), "Ticket transitioned");
}
