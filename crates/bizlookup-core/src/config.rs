use std::net::SocketAddr;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let database_url =
        lookup("DATABASE_URL").map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

    let env = parse_environment(&or_default("BIZLOOKUP_ENV", "development"));

    let bind_addr: SocketAddr =
        parse_var("BIZLOOKUP_BIND_ADDR", &or_default("BIZLOOKUP_BIND_ADDR", "0.0.0.0:3000"))?;
    let log_level = or_default("BIZLOOKUP_LOG_LEVEL", "info");

    let db_max_connections: u32 = parse_var(
        "BIZLOOKUP_DB_MAX_CONNECTIONS",
        &or_default("BIZLOOKUP_DB_MAX_CONNECTIONS", "10"),
    )?;
    let db_min_connections: u32 = parse_var(
        "BIZLOOKUP_DB_MIN_CONNECTIONS",
        &or_default("BIZLOOKUP_DB_MIN_CONNECTIONS", "1"),
    )?;
    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "BIZLOOKUP_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }
    let db_acquire_timeout_secs: u64 = parse_var(
        "BIZLOOKUP_DB_ACQUIRE_TIMEOUT_SECS",
        &or_default("BIZLOOKUP_DB_ACQUIRE_TIMEOUT_SECS", "10"),
    )?;

    let seed_on_startup = parse_flag(&or_default("BIZLOOKUP_SEED_ON_STARTUP", "false"))
        .ok_or_else(|| ConfigError::InvalidEnvVar {
            var: "BIZLOOKUP_SEED_ON_STARTUP".to_string(),
            reason: "expected true/false or 1/0".to_string(),
        })?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        seed_on_startup,
    })
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
