//! # SchoolHub Observability
//!
//! Tracing subscriber setup, per-request logging and Prometheus metrics.
//!
//! Everything here can be compiled out with `--no-default-features`; the
//! functions then fall back to console logging and no-op metrics so callers
//! never need their own `cfg` guards. At runtime `OBSERVABILITY_ENABLED=false`
//! has the same effect without recompiling.
//!
//! ```no_run
//! use schoolhub_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     // ... serve ...
//!     shutdown_tracer().await;
//! }
//! ```

pub mod basic_logging;

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use metrics::{
    PrometheusHandle, init_metrics, metrics_middleware, track_account_registered,
    track_approval_decision, track_login_failure, track_login_success, track_token_issued,
};

/// Reads `OBSERVABILITY_ENABLED` once; anything but `false`/`0` enables it.
pub fn is_observability_enabled() -> bool {
    use std::sync::OnceLock;

    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| !v.eq_ignore_ascii_case("false") && v != "0")
            .unwrap_or(true)
    })
}

#[cfg(not(feature = "observability"))]
mod stubs {
    use axum::{extract::Request, middleware::Next, response::Response};

    /// Stand-in for the Prometheus handle so `/metrics` wiring still type-checks.
    #[derive(Clone, Debug)]
    pub struct PrometheusHandle;

    impl PrometheusHandle {
        pub fn render(&self) -> String {
            String::new()
        }
    }

    pub fn init_tracing() {
        super::init_basic_console_logging();
    }

    pub async fn shutdown_tracer() {}

    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn track_account_registered(_role: &str) {}
    pub fn track_login_success(_role: &str) {}
    pub fn track_login_failure(_reason: &str) {}
    pub fn track_token_issued() {}
    pub fn track_approval_decision(_decision: &str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
