use axum::{body::Bytes, extract::State, Extension, Json};
use brandkit_core::{ScrapeRequest, ScrapeResult};

use super::{ApiError, AppState};
use crate::middleware::RequestId;

/// `POST /api/v1/scrape` (and the legacy `/api/scrape`).
///
/// The body is parsed by hand rather than with the `Json` extractor so that a
/// malformed body yields the same `{ "error": ... }` shape as every other
/// failure. An empty body or a JSON `null` counts as a request without a URL.
pub(super) async fn scrape_brand(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<ScrapeResult>, ApiError> {
    let request = parse_request(&body)?;
    let Some(url) = request.normalized_url() else {
        return Err(ApiError::bad_request("URL is required"));
    };

    tracing::info!(request_id = %req_id.0, %url, "scrape requested");
    match state.scraper.scrape(&url).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            tracing::error!(request_id = %req_id.0, %url, error = %e, "scrape failed");
            Err(ApiError::internal(e.to_string()))
        }
    }
}

fn parse_request(body: &[u8]) -> Result<ScrapeRequest, ApiError> {
    if body.trim_ascii().is_empty() {
        return Ok(ScrapeRequest::default());
    }
    serde_json::from_slice::<Option<ScrapeRequest>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| ApiError::bad_request(format!("invalid request body: {e}")))
}
