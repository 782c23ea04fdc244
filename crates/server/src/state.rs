use counterline_core::{Config, SanitizedConfig, TicketRegistry};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    config: Config,
    registry: Arc<TicketRegistry>,
}

impl AppState {
    pub fn new(config: Config, registry: Arc<TicketRegistry>) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn registry(&self) -> &TicketRegistry {
        self.registry.as_ref()
    }
}
