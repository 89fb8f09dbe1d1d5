//! HTTP access: one page fetch and follow-up image fetches.

use std::time::Duration;

use brandkit_core::PipelineSettings;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{redirect, Client, Url};

use crate::error::ScraperError;

const PAGE_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const PAGE_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// A fetched HTML document and the URL it was served from after redirects.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    pub final_url: Url,
}

/// Browser-like HTTP client shared across requests.
///
/// The page timeout and redirect cap apply to every request; image fetches
/// additionally get the shorter per-request image timeout.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    image_timeout: Duration,
    max_image_bytes: usize,
}

impl PageFetcher {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(settings: &PipelineSettings) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.fetch_timeout_secs))
            .connect_timeout(Duration::from_secs(
                CONNECT_TIMEOUT_SECS.min(settings.fetch_timeout_secs),
            ))
            .user_agent(settings.user_agent.as_str())
            .redirect(redirect::Policy::limited(settings.max_redirects))
            .build()?;
        Ok(Self {
            client,
            image_timeout: Duration::from_secs(settings.image_timeout_secs),
            max_image_bytes: settings.max_image_bytes,
        })
    }

    /// Fetches `url` as HTML. No retries: any transport error, timeout,
    /// redirect overflow or non-2xx status fails the call.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] when `url` does not parse.
    /// - [`ScraperError::Http`] on transport failure or timeout.
    /// - [`ScraperError::UnexpectedStatus`] on a non-2xx response.
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        let parsed = parse_url(url)?;
        tracing::debug!(url = %parsed, "fetching page");

        let response = self
            .client
            .get(parsed)
            .header(ACCEPT, PAGE_ACCEPT)
            .header(ACCEPT_LANGUAGE, PAGE_ACCEPT_LANGUAGE)
            .send()
            .await?;

        let status = response.status();
        let final_url = response.url().clone();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: final_url.to_string(),
            });
        }

        let html = response.text().await?;
        tracing::debug!(url = %final_url, bytes = html.len(), "page fetched");
        Ok(FetchedPage { html, final_url })
    }

    /// Fetches raw image bytes with the image timeout. The body is read in
    /// chunks and abandoned once it passes the configured byte cap.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`PageFetcher::fetch_page`], plus
    /// [`ScraperError::ImageTooLarge`] when the body exceeds the cap.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ScraperError> {
        let parsed = parse_url(url)?;
        let mut response = self
            .client
            .get(parsed)
            .timeout(self.image_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let too_large = || ScraperError::ImageTooLarge {
            url: url.to_owned(),
            limit: self.max_image_bytes,
        };
        let declared = response
            .content_length()
            .and_then(|len| usize::try_from(len).ok());
        if declared.is_some_and(|len| len > self.max_image_bytes) {
            return Err(too_large());
        }

        let mut bytes = Vec::with_capacity(declared.unwrap_or(0));
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > self.max_image_bytes {
                return Err(too_large());
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

fn parse_url(url: &str) -> Result<Url, ScraperError> {
    let parsed = Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: format!("unsupported scheme \"{other}\""),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_url_rejects_garbage_and_non_http() {
        assert!(matches!(
            parse_url("https://exa mple.com"),
            Err(ScraperError::InvalidUrl { .. })
        ));
        assert!(matches!(
            parse_url("ftp://example.com/file"),
            Err(ScraperError::InvalidUrl { .. })
        ));
        assert!(parse_url("http://example.com/a?b=c").is_ok());
    }

    #[test]
    fn fetcher_builds_from_default_settings() {
        assert!(PageFetcher::new(&PipelineSettings::default()).is_ok());
    }
}
