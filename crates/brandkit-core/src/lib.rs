pub mod app_config;
pub mod config;
pub mod hex;
pub mod result;
pub mod settings;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use hex::{normalize_hex, parse_rgb, Rgb};
pub use result::{Product, ScrapeRequest, ScrapeResult};
pub use settings::PipelineSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
