//! Core ticket data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a ticket.
///
/// Transitions only move forward:
///
/// ```text
/// Waiting -> Called -> Served
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// In the waiting line, not yet called.
    Waiting,
    /// Called to the counter, not yet served.
    Called,
    /// Served (terminal).
    Served,
}

impl TicketStatus {
    /// Returns the status as it appears on the wire (for filtering and metric labels).
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Waiting => "WAITING",
            TicketStatus::Called => "CALLED",
            TicketStatus::Served => "SERVED",
        }
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Served)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numbered ticket in the service queue.
///
/// Fields are read-only outside this crate. Status and its timestamp are only
/// changed together by [`TicketRegistry`](super::TicketRegistry) transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    number: u64,
    status: TicketStatus,
    created_at: DateTime<Utc>,
    called_at: Option<DateTime<Utc>>,
    served_at: Option<DateTime<Utc>>,
}

impl Ticket {
    pub(crate) fn new(number: u64, created_at: DateTime<Utc>) -> Self {
        Self {
            number,
            status: TicketStatus::Waiting,
            created_at,
            called_at: None,
            served_at: None,
        }
    }

    /// Sequential ticket number (starts at 1).
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn status(&self) -> TicketStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the ticket was called, if it has been.
    pub fn called_at(&self) -> Option<DateTime<Utc>> {
        self.called_at
    }

    /// When the ticket was served, if it has been.
    pub fn served_at(&self) -> Option<DateTime<Utc>> {
        self.served_at
    }

    /// Serializable projection of this ticket.
    pub fn to_view(&self) -> TicketView {
        TicketView::from(self)
    }

    /// Set the status and stamp the matching timestamp.
    ///
    /// A ticket in a terminal status is left untouched. A timestamp that is
    /// already set is kept. A new stamp is never earlier than the previous one
    /// in the lifecycle, so a clock step backwards cannot break
    /// `created_at <= called_at <= served_at`.
    pub(crate) fn set_status(&mut self, status: TicketStatus, now: DateTime<Utc>) {
        if self.status.is_terminal() {
            return;
        }
        self.status = status;
        match status {
            TicketStatus::Waiting => {}
            TicketStatus::Called => {
                if self.called_at.is_none() {
                    self.called_at = Some(now.max(self.created_at));
                }
            }
            TicketStatus::Served => {
                if self.served_at.is_none() {
                    let floor = self.called_at.unwrap_or(self.created_at);
                    self.served_at = Some(now.max(floor));
                }
            }
        }
    }
}

/// Wire representation of a ticket.
///
/// Serializes as `{number, status, createdAt, calledAt, servedAt}`, with the
/// last two `null` when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    pub number: u64,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub called_at: Option<DateTime<Utc>>,
    pub served_at: Option<DateTime<Utc>>,
}

impl From<&Ticket> for TicketView {
    fn from(ticket: &Ticket) -> Self {
        Self {
            number: ticket.number,
            status: ticket.status,
            created_at: ticket.created_at,
            called_at: ticket.called_at,
            served_at: ticket.served_at,
        }
    }
}

impl From<Ticket> for TicketView {
    fn from(ticket: Ticket) -> Self {
        Self::from(&ticket)
    }
}

/// Point-in-time counts of the registry collections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueueStats {
    pub waiting: usize,
    pub called: usize,
    pub served: usize,
    /// Tickets currently held by the registry (dequeued tickets are not counted).
    pub total: usize,
    /// Number the next created ticket will receive.
    pub next_number: u64,
}
