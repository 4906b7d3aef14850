//! Coffee Shop Observability
//!
//! - Structured logging through `tracing`, to the console and optionally to
//!   daily-rolling JSON files
//! - HTTP request/response logging middleware
//! - Prometheus metrics: request counters and latency histograms plus the
//!   authorization and drink mutation counters
//!
//! Controlled at runtime by the `OBSERVABILITY_ENABLED` environment variable
//! (enabled unless set to `false` or `0`). When disabled, only basic console
//! logging is installed and every metrics helper is a no-op.
//!
//! # Examples
//!
//! ```no_run
//! use coffeeshop_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     let handle = init_metrics().expect("metrics recorder");
//!     // ... application code ...
//! }
//! ```

pub mod logging;
pub mod metrics;

pub use metrics_exporter_prometheus::PrometheusHandle;

pub use self::logging::{init_tracing, logging_middleware};
pub use self::metrics::{
    init_metrics, is_observability_enabled, metrics_app, metrics_middleware, track_auth_denial,
    track_authorization_check, track_drink_mutation, track_jwks_refresh,
};
