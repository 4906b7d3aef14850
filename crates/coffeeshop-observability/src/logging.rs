use axum::{
    extract::{MatchedPath, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, debug, error, info, info_span, warn};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::metrics::is_observability_enabled;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Logs each request and its outcome inside an `http_request` span.
///
/// A non-empty incoming `x-request-id` is reused, otherwise a fresh one is
/// generated; either way it is echoed on the response.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_owned(), |p| p.as_str().to_owned());

    let span = info_span!(
        "http_request",
        request_id = %request_id,
        method = %req.method(),
        route = %route,
    );

    async move {
        debug!("Request received");

        let mut response = next.run(req).await;
        let status = response.status().as_u16();
        let latency_ms = started.elapsed().as_millis() as u64;

        if response.status().is_server_error() {
            error!(status, latency_ms, "Request failed");
        } else if response.status().is_client_error() {
            warn!(status, latency_ms, "Request rejected");
        } else {
            info!(status, latency_ms, "Request completed");
        }

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}

fn default_filter() -> EnvFilter {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "coffeeshop={level},coffeeshop_auth={level},coffeeshop_core={level},coffeeshop_db={level},tower_http=warn,hyper=warn,sqlx=warn",
            level = log_level
        ))
    })
}

/// Installs the global subscriber.
///
/// # Configuration
///
/// - `RUST_LOG` / `LOG_LEVEL`: filter for console output (default: `info` for
///   the service crates, `warn` for noisy dependencies)
/// - `LOG_DIR`: when set, structured JSON logs are also written to a
///   daily-rolling `coffeeshop.json` file in that directory
/// - `OBSERVABILITY_ENABLED=false`: console logging only
pub fn init_tracing() {
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(default_filter());

    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());

    match log_dir {
        Some(dir) if is_observability_enabled() => {
            use tracing_appender::rolling::{RollingFileAppender, Rotation};

            // JSON file layer for structured logs (can be ingested by Loki)
            let json_appender = RollingFileAppender::new(Rotation::DAILY, &dir, "coffeeshop.json");
            let json_layer = fmt::layer()
                .json()
                .with_writer(json_appender)
                .with_current_span(true)
                .with_span_list(true)
                .with_filter(EnvFilter::new("info"));

            tracing_subscriber::registry()
                .with(console_layer)
                .with(json_layer)
                .init();

            info!(log_dir = %dir, "Tracing initialized with JSON file logging");
        }
        _ => {
            tracing_subscriber::registry().with(console_layer).init();

            if !is_observability_enabled() {
                info!("Observability disabled - console logging only");
            }
        }
    }
}
