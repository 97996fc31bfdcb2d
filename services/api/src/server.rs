use crate::cli::ServeArgs;
use crate::infra::{spawn_change_logger, AppState, ConfiguredSink};
use crate::routes::with_scouting_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use scout_engine::config::AppConfig;
use scout_engine::error::AppError;
use scout_engine::scouting::{ScoringRules, ScoutingService};
use scout_engine::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.store.take() {
        config.storage.override_path(path);
    }

    telemetry::init(&config.telemetry)?;

    let sink = ConfiguredSink::from_config(&config.storage);
    let store = sink.describe();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        store: store.clone(),
        started_at: Utc::now(),
    };

    let service = Arc::new(ScoutingService::new(
        Arc::new(sink),
        ScoringRules::default(),
    ));
    let existing = service.list_all()?.len();
    spawn_change_logger(&service);

    let app = with_scouting_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, %store, existing, "scouting engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
