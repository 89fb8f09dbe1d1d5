use std::net::SocketAddr;

use crate::settings::PipelineSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub fetch_timeout_secs: u64,
    pub image_timeout_secs: u64,
    pub max_redirects: usize,
    pub user_agent: String,
    pub fallback_color: String,
    pub fallback_font: String,
    pub logo_service_url: String,
    pub max_products: usize,
}

impl AppConfig {
    /// Pipeline settings derived from this config; fields without an env
    /// override keep their defaults.
    #[must_use]
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            user_agent: self.user_agent.clone(),
            fetch_timeout_secs: self.fetch_timeout_secs,
            image_timeout_secs: self.image_timeout_secs,
            max_redirects: self.max_redirects,
            fallback_color: self.fallback_color.clone(),
            fallback_font: self.fallback_font.clone(),
            logo_service_url: self.logo_service_url.clone(),
            max_products: self.max_products,
            ..PipelineSettings::default()
        }
    }
}
