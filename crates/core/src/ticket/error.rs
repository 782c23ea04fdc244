//! Error types for the ticket registry.

use thiserror::Error;

/// Errors returned by head-accessing queue operations.
///
/// Absence of an eligible ticket in call/serve operations is reported as
/// `None`/`false` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The waiting queue has no tickets.
    #[error("Queue is empty")]
    EmptyQueue,
}
