use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sentinel_observability::{encode_text, ProbeStatus};
use serde_json::json;

use crate::state::{HealthState, MetricsState};

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub async fn readyz(State(state): State<HealthState>) -> Response {
    let ready = state.readiness.is_ready();
    let checks = state.readiness.evaluate().await;

    let status_strings: BTreeMap<String, String> = checks
        .iter()
        .map(|(name, status)| {
            let value = match status {
                ProbeStatus::Ok => "ok".to_string(),
                ProbeStatus::Unavailable => "unavailable".to_string(),
                ProbeStatus::Error(message) => message.clone(),
            };
            (name.clone(), value)
        })
        .collect();

    let all_ok = ready && checks.values().all(|s| *s == ProbeStatus::Ok);

    let body = json!({
        "status": if all_ok { "ok" } else { "error" },
        "checks": status_strings,
    });

    let code = if all_ok { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (code, Json(body)).into_response()
}

pub async fn metrics(State(state): State<MetricsState>) -> Response {
    match encode_text(&state.registry) {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
