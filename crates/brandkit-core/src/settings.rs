//! Per-deployment knobs for the extraction pipeline.
//!
//! Every literal the pipeline falls back to lives here as a named constant so
//! a deployment can override it through [`crate::AppConfig`].

/// Background color used when no page or image color is found.
pub const DEFAULT_FALLBACK_COLOR: &str = "#1F2937";

/// Secondary palette appended after the fallback color.
pub const DEFAULT_SECONDARY_PALETTE: [&str; 4] = ["#2563EB", "#7C3AED", "#DB2777", "#059669"];

pub const DEFAULT_FALLBACK_FONT: &str = "Merriweather";

/// Logo-by-domain service; the domain is appended as a path segment.
pub const DEFAULT_LOGO_SERVICE_URL: &str = "https://logo.clearbit.com";

/// Placeholder image service; the brand name is appended as `?text=`.
pub const DEFAULT_PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/800x600/3498db/ffffff";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
pub const DEFAULT_MAX_PRODUCTS: usize = 24;

/// Image bodies larger than this are abandoned before decoding.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;

/// Settings consumed by the fetcher and the resolvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub user_agent: String,
    pub fetch_timeout_secs: u64,
    pub image_timeout_secs: u64,
    pub max_redirects: usize,
    pub fallback_color: String,
    pub secondary_palette: Vec<String>,
    pub fallback_font: String,
    pub logo_service_url: String,
    pub placeholder_image_url: String,
    pub max_products: usize,
    pub max_image_bytes: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            image_timeout_secs: DEFAULT_IMAGE_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            fallback_color: DEFAULT_FALLBACK_COLOR.to_owned(),
            secondary_palette: DEFAULT_SECONDARY_PALETTE
                .iter()
                .map(|c| (*c).to_owned())
                .collect(),
            fallback_font: DEFAULT_FALLBACK_FONT.to_owned(),
            logo_service_url: DEFAULT_LOGO_SERVICE_URL.to_owned(),
            placeholder_image_url: DEFAULT_PLACEHOLDER_IMAGE_URL.to_owned(),
            max_products: DEFAULT_MAX_PRODUCTS,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl PipelineSettings {
    /// Fallback logo URL for `domain`.
    #[must_use]
    pub fn logo_service_for(&self, domain: &str) -> String {
        format!("{}/{domain}", self.logo_service_url.trim_end_matches('/'))
    }
}
