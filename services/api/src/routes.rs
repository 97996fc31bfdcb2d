use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use scout_engine::scouting::{scouting_router, ReportSink, ScoutingService};
use serde::Serialize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct ServiceStatus {
    pub(crate) status: &'static str,
    pub(crate) version: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReadinessStatus {
    pub(crate) status: &'static str,
    pub(crate) store: String,
    pub(crate) started_at: DateTime<Utc>,
}

/// Scouting API plus the operational endpoints probed by the deployment.
pub(crate) fn with_scouting_routes<S>(service: Arc<ScoutingService<S>>) -> axum::Router
where
    S: ReportSink + 'static,
{
    scouting_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 503 until the listener is bound.
pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Acquire);
    let (status, label) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "starting")
    };

    (
        status,
        Json(ReadinessStatus {
            status: label,
            store: state.store.clone(),
            started_at: state.started_at,
        }),
    )
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
