use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::form::FormPayload;
use super::report::{ReportId, ReportSubmission};
use super::service::{ScoutingService, ScoutingServiceError};
use super::store::ReportSink;
use super::views::{ReportCardView, ReportDetailView, TeamCardView, TeamDetailView};

/// Router builder exposing scoring, report, and team endpoints.
pub fn scouting_router<S>(service: Arc<ScoutingService<S>>) -> Router
where
    S: ReportSink + 'static,
{
    Router::new()
        .route("/api/v1/scouting/score", post(score_handler::<S>))
        .route(
            "/api/v1/scouting/reports",
            post(submit_handler::<S>).get(list_reports_handler::<S>),
        )
        .route(
            "/api/v1/scouting/reports/:report_id",
            get(report_handler::<S>).delete(delete_handler::<S>),
        )
        .route("/api/v1/scouting/teams", get(list_teams_handler::<S>))
        .route(
            "/api/v1/scouting/teams/:team_number",
            get(team_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportListQuery {
    pub(crate) team: Option<u32>,
    pub(crate) q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TeamListQuery {
    pub(crate) q: Option<String>,
}

fn error_response(error: ScoutingServiceError) -> Response {
    let status = match &error {
        ScoutingServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScoutingServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ScoutingServiceError::Sink(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<ScoutingService<S>>>,
    axum::Json(form): axum::Json<FormPayload>,
) -> Response
where
    S: ReportSink + 'static,
{
    let unknown = form.unknown_fields();
    if !unknown.is_empty() {
        debug!(?unknown, "ignoring fields outside the form schema");
    }
    let breakdown = service.preview(&form.answers());
    (StatusCode::OK, axum::Json(breakdown)).into_response()
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<ScoutingService<S>>>,
    axum::Json(submission): axum::Json<ReportSubmission>,
) -> Response
where
    S: ReportSink + 'static,
{
    match service.save(submission) {
        Ok(report) => {
            let breakdown = service.preview(&report.answers);
            let view = ReportDetailView::new(&report, &breakdown);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_reports_handler<S>(
    State(service): State<Arc<ScoutingService<S>>>,
    Query(query): Query<ReportListQuery>,
) -> Response
where
    S: ReportSink + 'static,
{
    let reports = match (query.team, query.q.as_deref()) {
        (Some(team_number), _) => service.list_by_team(team_number),
        (None, Some(term)) => service.search_reports(term),
        (None, None) => service.list_all(),
    };

    match reports {
        Ok(reports) => {
            let cards: Vec<ReportCardView> = reports.iter().map(ReportCardView::from).collect();
            (StatusCode::OK, axum::Json(cards)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<ScoutingService<S>>>,
    Path(report_id): Path<String>,
) -> Response
where
    S: ReportSink + 'static,
{
    match service.get(&ReportId(report_id)) {
        Ok(report) => {
            let breakdown = service.preview(&report.answers);
            let view = ReportDetailView::new(&report, &breakdown);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<S>(
    State(service): State<Arc<ScoutingService<S>>>,
    Path(report_id): Path<String>,
) -> Response
where
    S: ReportSink + 'static,
{
    match service.delete(&ReportId(report_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_teams_handler<S>(
    State(service): State<Arc<ScoutingService<S>>>,
    Query(query): Query<TeamListQuery>,
) -> Response
where
    S: ReportSink + 'static,
{
    let teams = match query.q.as_deref() {
        Some(term) => service.search(term),
        None => service.aggregate_by_team(),
    };

    match teams {
        Ok(teams) => {
            let cards: Vec<TeamCardView> = teams.iter().map(TeamCardView::from).collect();
            (StatusCode::OK, axum::Json(cards)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn team_handler<S>(
    State(service): State<Arc<ScoutingService<S>>>,
    Path(team_number): Path<u32>,
) -> Response
where
    S: ReportSink + 'static,
{
    match service.team(team_number) {
        Ok(Some(team)) => (StatusCode::OK, axum::Json(TeamDetailView::from(&team))).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": format!("team {team_number} has no reports"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}
