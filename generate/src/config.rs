//! Configuration management via environment variables
//!
//! Provides helper functions for reading `MSGGEN_*` environment variables
//! (blank values count as unset) and the startup assembly of file config
//! plus environment overrides.

use anyhow::Context;
use msggen_common::config::GenerateConfig;
use std::path::Path;

/// Get a non-blank environment variable
///
/// `MSGGEN_HOST=` (as written by compose files and systemd units with an
/// empty substitution) is treated the same as an unset variable.
///
/// # Example
/// ```
/// use msggen::config::get_env;
///
/// let port = get_env("MSGGEN_PORT");
/// ```
pub fn get_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Get an environment variable with a default value
pub fn get_env_or(name: &str, default: &str) -> String {
    get_env(name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable, parsing to a specific type
///
/// Unparsable values are logged and treated as unset.
pub fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = get_env(name)?;
    match raw.parse() {
        Ok(val) => Some(val),
        Err(_) => {
            tracing::warn!(
                "Ignoring invalid value '{}' for environment variable '{}'",
                raw,
                name
            );
            None
        }
    }
}

/// Load the server configuration.
///
/// The config file is optional. `MSGGEN_*` variables (`MSGGEN_PORT`,
/// `MSGGEN_ERROR_FIELD`, `MSGGEN_REQUEST_TIMEOUT_SECS`, ...) override file values.
pub fn load(path: Option<&Path>) -> anyhow::Result<GenerateConfig> {
    GenerateConfig::load(path).with_context(|| match path {
        Some(path) => format!("failed to load config file {}", path.display()),
        None => "failed to load configuration from environment".to_string(),
    })
}
