mod scrape;

use std::sync::Arc;

use axum::{
    http::{
        header::{
            self, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue, Method, StatusCode,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use brandkit_scraper::BrandScraper;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<BrandScraper>,
}

/// Error body shared by every non-2xx response: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    pub error: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    let scrape_routes = post(scrape::scrape_brand).options(preflight);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/scrape", scrape_routes.clone())
        // kept for clients of the unversioned endpoint
        .route("/api/scrape", scrape_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id))
                // Every response carries the permissive CORS headers, including
                // errors and bare OPTIONS requests without an Origin.
                .layer(SetResponseHeaderLayer::overriding(
                    ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("Content-Type"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static("POST, OPTIONS"),
                ))
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::response::Response;
    use brandkit_core::PipelineSettings;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_with(settings: PipelineSettings) -> Router {
        let scraper = BrandScraper::new(settings).expect("scraper");
        build_app(AppState {
            scraper: Arc::new(scraper),
        })
    }

    fn test_app() -> Router {
        app_with(PipelineSettings::default())
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .expect("request")
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
        assert!(headers.contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn bare_options_returns_empty_ok() {
        for uri in ["/api/v1/scrape", "/api/scrape"] {
            let response = test_app()
                .oneshot(
                    Request::builder()
                        .method(Method::OPTIONS)
                        .uri(uri)
                        .body(Body::empty())
                        .expect("request"),
                )
                .await
                .expect("response");

            assert_eq!(response.status(), StatusCode::OK);
            assert_cors(&response);
            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert!(body.is_empty());
        }
    }

    #[tokio::test]
    async fn browser_preflight_is_answered() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/v1/scrape")
                    .header(header::ORIGIN, "https://postcards.example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn missing_url_is_bad_request() {
        let bodies = [
            r"{}",
            r#"{"url": ""}"#,
            r#"{"url": "   "}"#,
            r#"{"url": null}"#,
            "null",
            "",
            "  \n",
        ];
        for body in bodies {
            let response = test_app()
                .oneshot(post_json("/api/v1/scrape", body))
                .await
                .expect("response");

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            assert_cors(&response);
            assert_eq!(
                json_body(response).await,
                serde_json::json!({ "error": "URL is required" })
            );
        }
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let response = test_app()
            .oneshot(post_json("/api/v1/scrape", "url=https://example.com"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert!(json["error"]
            .as_str()
            .is_some_and(|e| e.starts_with("invalid request body")));
    }

    #[tokio::test]
    async fn scrape_returns_result_on_both_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r##"<html><head><title>Cool Brand | Home</title>
                    <meta name="theme-color" content="#3366CC"></head></html>"##,
            ))
            .mount(&server)
            .await;
        let settings = PipelineSettings {
            logo_service_url: format!("{}/logo-service", server.uri()),
            ..PipelineSettings::default()
        };

        for uri in ["/api/v1/scrape", "/api/scrape"] {
            let body = serde_json::json!({ "url": server.uri() }).to_string();
            let response = app_with(settings.clone())
                .oneshot(post_json(uri, &body))
                .await
                .expect("response");

            assert_eq!(response.status(), StatusCode::OK);
            assert_cors(&response);
            let json = json_body(response).await;
            assert_eq!(json["brandName"], "Cool Brand");
            assert_eq!(json["activeColor"], "#3366CC");
            assert_eq!(json["products"], serde_json::json!([]));
        }
    }

    #[tokio::test]
    async fn upstream_failure_is_internal_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let body = serde_json::json!({ "url": server.uri() }).to_string();
        let response = test_app()
            .oneshot(post_json("/api/v1/scrape", &body))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        let json = json_body(response).await;
        assert!(json["error"].as_str().is_some_and(|e| e.contains("503")));
    }

    #[tokio::test]
    async fn upstream_timeout_is_internal_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html></html>")
                    .set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&server)
            .await;
        let settings = PipelineSettings {
            fetch_timeout_secs: 1,
            ..PipelineSettings::default()
        };

        let body = serde_json::json!({ "url": server.uri() }).to_string();
        let response = app_with(settings)
            .oneshot(post_json("/api/v1/scrape", &body))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
        assert!(json.get("brandName").is_none());
    }
}
