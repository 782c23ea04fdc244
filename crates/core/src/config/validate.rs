use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - At least one CORS origin is configured
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.cors.allowed_origins.is_empty() {
        return Err(ConfigError::ValidationError(
            "cors.allowed_origins cannot be empty (use [\"*\"] to allow any origin)".to_string(),
        ));
    }

    Ok(())
}
