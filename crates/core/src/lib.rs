pub mod config;
pub mod metrics;
pub mod ticket;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, CorsConfig,
    SanitizedConfig, ServerConfig,
};
pub use ticket::{QueueError, QueueStats, Ticket, TicketRegistry, TicketStatus, TicketView};
