use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use sentinel_observability::ReadinessRegistry;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::{HealthState, MetricsState};

/// `/healthz` (always 200) and `/readyz` (binary-ready + on-demand probes).
pub fn health_app(readiness: Arc<ReadinessRegistry>) -> Router {
    let state = HealthState { readiness };

    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `/metrics` — Prometheus text exposition of the process registry.
pub fn metrics_app(registry: Arc<prometheus::Registry>) -> Router {
    let state = MetricsState { registry };

    Router::new()
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sentinel_observability::{MetricsRegistry, Probe};
    use tower::util::ServiceExt;

    struct FailingProbe;
    #[async_trait::async_trait]
    impl Probe for FailingProbe {
        async fn check(&self) -> Result<(), String> {
            Err("broker unreachable".into())
        }
    }

    #[tokio::test]
    async fn healthz_always_returns_ok() {
        let readiness = Arc::new(ReadinessRegistry::new());
        let app = health_app(readiness);
        let response = app
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn readyz_returns_503_before_ready() {
        let readiness = Arc::new(ReadinessRegistry::new());
        let app = health_app(readiness);
        let response = app
            .oneshot(Request::builder().uri("/readyz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn readyz_returns_200_when_ready_and_probes_pass() {
        let readiness = Arc::new(ReadinessRegistry::new());
        readiness.set_ready(true);
        let app = health_app(readiness);
        let response = app
            .oneshot(Request::builder().uri("/readyz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn readyz_returns_503_when_a_probe_fails() {
        let readiness = Arc::new(ReadinessRegistry::new());
        readiness.set_ready(true);
        readiness.register_probe("broker", Arc::new(FailingProbe)).await;
        let app = health_app(readiness);
        let response = app
            .oneshot(Request::builder().uri("/readyz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn metrics_endpoint_returns_prometheus_text() {
        let registry = Arc::new(prometheus::Registry::new());
        MetricsRegistry::new(&registry).unwrap();
        let app = metrics_app(registry);
        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
