//! Prometheus metrics for core components.
//!
//! The server registers these into its registry via [`all_metrics`].

use once_cell::sync::Lazy;
use prometheus::{IntCounterVec, Opts};

/// Ticket lifecycle transitions by kind.
pub static TICKET_TRANSITIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "counterline_ticket_transitions_total",
            "Ticket lifecycle transitions",
        ),
        &["transition"], // "created", "called", "served", "dequeued"
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![Box::new(TICKET_TRANSITIONS.clone())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_metrics_registers_cleanly() {
        let registry = prometheus::Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }

        TICKET_TRANSITIONS.with_label_values(&["created"]).inc();
        let families = registry.gather();
        assert!(families
            .iter()
            .any(|f| f.get_name() == "counterline_ticket_transitions_total"));
    }
}
