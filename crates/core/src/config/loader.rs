use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment prefix for overrides. Nested keys use a double underscore
/// (`COUNTERLINE_SERVER__PORT`) so that `allowed_origins` keeps its own underscore.
const ENV_PREFIX: &str = "COUNTERLINE_";
const ENV_SEPARATOR: &str = "__";

/// Load configuration, layering built-in defaults, the file when it exists, and the environment.
///
/// A missing file is not an error: the environment still applies on top of the defaults.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    layered(path.exists().then_some(path))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn layered(path: Option<&Path>) -> Figment {
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let figment = match path {
        Some(path) => figment.merge(Toml::file(path)),
        None => figment,
    };
    figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR))
}
