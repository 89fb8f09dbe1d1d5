use crate::app_config::{AppConfig, Environment};
use crate::hex::normalize_hex;
use crate::settings::{
    DEFAULT_FALLBACK_COLOR, DEFAULT_FALLBACK_FONT, DEFAULT_LOGO_SERVICE_URL, DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so parsing can be tested against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("BRANDKIT_ENV", "development"))?;
    let bind_addr = parse_addr("BRANDKIT_BIND_ADDR", "0.0.0.0:8888")?;
    let log_level = or_default("BRANDKIT_LOG_LEVEL", "info");

    let fetch_timeout_secs = parse_u64("BRANDKIT_FETCH_TIMEOUT_SECS", "15")?;
    let image_timeout_secs = parse_u64("BRANDKIT_IMAGE_TIMEOUT_SECS", "10")?;
    for (var, value) in [
        ("BRANDKIT_FETCH_TIMEOUT_SECS", fetch_timeout_secs),
        ("BRANDKIT_IMAGE_TIMEOUT_SECS", image_timeout_secs),
    ] {
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
    }

    let max_redirects = parse_usize("BRANDKIT_MAX_REDIRECTS", "5")?;
    let max_products = parse_usize("BRANDKIT_MAX_PRODUCTS", "24")?;
    let user_agent = or_default("BRANDKIT_USER_AGENT", DEFAULT_USER_AGENT);

    let raw_color = or_default("BRANDKIT_FALLBACK_COLOR", DEFAULT_FALLBACK_COLOR);
    let fallback_color = normalize_hex(&raw_color).ok_or_else(|| ConfigError::InvalidEnvVar {
        var: "BRANDKIT_FALLBACK_COLOR".to_string(),
        reason: format!("\"{raw_color}\" is not a 3- or 6-digit hex color"),
    })?;

    let fallback_font = or_default("BRANDKIT_FALLBACK_FONT", DEFAULT_FALLBACK_FONT);
    let logo_service_url = or_default("BRANDKIT_LOGO_SERVICE_URL", DEFAULT_LOGO_SERVICE_URL);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        fetch_timeout_secs,
        image_timeout_secs,
        max_redirects,
        user_agent,
        fallback_color,
        fallback_font,
        logo_service_url,
        max_products,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BRANDKIT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
