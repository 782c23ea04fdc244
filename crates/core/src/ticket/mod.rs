//! Ticket system for the service counter queue.

mod error;
mod registry;
mod types;

pub use error::QueueError;
pub use registry::TicketRegistry;
pub use types::{QueueStats, Ticket, TicketStatus, TicketView};
