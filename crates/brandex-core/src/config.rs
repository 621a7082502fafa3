use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
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
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("BRANDEX_ENV", "development"))?;
    let log_level = or_default("BRANDEX_LOG_LEVEL", "info");
    let sources_path = PathBuf::from(or_default("BRANDEX_SOURCES_PATH", "./config/sources.yaml"));
    let canonical_path = PathBuf::from(or_default(
        "BRANDEX_CANONICAL_PATH",
        "./data/brands_canonical.csv",
    ));
    let csv_delimiter = parse_delimiter(&or_default("BRANDEX_CSV_DELIMITER", ","))?;

    Ok(AppConfig {
        env,
        log_level,
        sources_path,
        canonical_path,
        csv_delimiter,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BRANDEX_ENV".to_string(),
            reason: format!("expected development, test or production; got '{other}'"),
        }),
    }
}

/// Parse a single-byte delimiter. The literal `\t` is accepted for tab.
pub(crate) fn parse_delimiter(raw: &str) -> Result<u8, ConfigError> {
    let raw = if raw == "\\t" { "\t" } else { raw };
    match raw.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(ConfigError::InvalidEnvVar {
            var: "BRANDEX_CSV_DELIMITER".to_string(),
            reason: format!("delimiter must be a single ASCII character; got '{raw}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
