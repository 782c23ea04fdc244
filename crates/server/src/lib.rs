//! HTTP front for the counterline ticket queue.

pub mod api;
pub mod metrics;
pub mod state;
