use std::collections::BTreeSet;
use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::scouting::answers::{
    AnswerSet, AutoRankingPoint, AutonomousAnswers, ConsiderationAnswers, EndgameAnswers,
    Movement, Positioning, TeleopAnswers,
};
use crate::scouting::report::{MatchType, Report, ReportId, ReportSubmission};
use crate::scouting::store::{MemoryReportSink, ReportSink, SinkError};
use crate::scouting::{scouting_router, ScoringRules, ScoutingService};

pub(super) fn kickoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
        .single()
        .expect("valid kickoff timestamp")
}

pub(super) fn minutes_after_kickoff(minutes: i64) -> DateTime<Utc> {
    kickoff() + Duration::minutes(minutes)
}

/// Offensive robot that touches every scoring rule once.
pub(super) fn offensive_answers() -> AnswerSet {
    AnswerSet {
        autonomous: AutonomousAnswers {
            functional: true,
            leave_start_zone: true,
            scores_in_hub: true,
            fuel_amount: Some(8),
            accuracy: Some(4),
            climb: true,
            ranking_points: BTreeSet::from([AutoRankingPoint::Auto, AutoRankingPoint::Score]),
        },
        teleop: TeleopAnswers::Offensive {
            fuel_capacity: Some(6),
            cycle_speed: Some(5),
            score_efficiency: Some(4),
            positioning: BTreeSet::from([Positioning::Hub, Positioning::Both]),
            inactive_hub: Some(3),
            movement: BTreeSet::from([Movement::Ramp, Movement::Sides]),
        },
        endgame: EndgameAnswers {
            climb_attempted: true,
            climb_level: Some(10),
            climb_speed: Some(5),
            ranking_point: Some(6),
        },
        considerations: ConsiderationAnswers {
            penalties: Some(-5),
            teamwork: Some(5),
            consistency: Some(3),
            reliability: Some(5),
            comments: "fast cycles".to_string(),
            ..ConsiderationAnswers::default()
        },
    }
}

pub(super) fn defensive_answers() -> AnswerSet {
    AnswerSet {
        teleop: TeleopAnswers::Defensive {
            defense_type: Some(7),
            defense_efficiency: Some(5),
        },
        ..AnswerSet::default()
    }
}

pub(super) fn penalty_only_answers(points: i32) -> AnswerSet {
    AnswerSet {
        considerations: ConsiderationAnswers {
            penalties: Some(points),
            ..ConsiderationAnswers::default()
        },
        ..AnswerSet::default()
    }
}

pub(super) fn submission(team_number: u32, team_name: &str, answers: AnswerSet) -> ReportSubmission {
    ReportSubmission {
        team_number: Some(team_number),
        team_name: team_name.to_string(),
        match_number: "12".to_string(),
        match_type: MatchType::Qualifier,
        scouter_name: "Lia".to_string(),
        answers,
        form: None,
        total_score: None,
    }
}

pub(super) fn build_service() -> (ScoutingService<MemoryReportSink>, Arc<MemoryReportSink>) {
    let sink = Arc::new(MemoryReportSink::default());
    let service = ScoutingService::new(sink.clone(), ScoringRules::default());
    (service, sink)
}

pub(super) fn scouting_router_with_service(
    service: ScoutingService<MemoryReportSink>,
) -> axum::Router {
    scouting_router(Arc::new(service))
}

pub(super) struct UnavailableSink;

impl ReportSink for UnavailableSink {
    fn append(&self, _report: Report) -> Result<ReportId, SinkError> {
        Err(SinkError::Unavailable("database offline".to_string()))
    }

    fn read_all(&self) -> Result<Vec<Report>, SinkError> {
        Err(SinkError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &ReportId) -> Result<bool, SinkError> {
        Err(SinkError::Unavailable("database offline".to_string()))
    }
}

/// Sink that replaces every id on append, like a remote store assigning push keys.
#[derive(Default)]
pub(super) struct RekeyingSink {
    inner: MemoryReportSink,
}

impl ReportSink for RekeyingSink {
    fn append(&self, mut report: Report) -> Result<ReportId, SinkError> {
        let count = self.inner.read_all()?.len();
        report.id = ReportId(format!("remote-{count}"));
        self.inner.append(report)
    }

    fn read_all(&self) -> Result<Vec<Report>, SinkError> {
        self.inner.read_all()
    }

    fn delete(&self, id: &ReportId) -> Result<bool, SinkError> {
        self.inner.delete(id)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
