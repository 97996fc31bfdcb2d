use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::aggregate::{self, SearchTerm, TeamAggregate};
use super::answers::{AnswerSet, SCHEMA_VERSION};
use super::report::{Report, ReportId, ReportSubmission, ValidationError};
use super::scoring::{ScoreBreakdown, ScoreCalculator, ScoringRules};
use super::store::{ReportSink, SinkError};

const EVENT_CAPACITY: usize = 64;

static REPORT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_report_id(timestamp: DateTime<Utc>) -> ReportId {
    let seq = REPORT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReportId(format!("rpt-{}-{seq:04}", timestamp.timestamp_millis()))
}

/// Change notification published after a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportEvent {
    Saved { id: ReportId, team_number: u32 },
    Deleted { id: ReportId },
}

/// Stored report whose total no longer matches a fresh computation of its answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreDrift {
    pub id: ReportId,
    pub team_number: u32,
    pub stored_total: i32,
    pub computed_total: i32,
}

/// Service composing the score calculator with a persistence sink.
pub struct ScoutingService<S> {
    sink: Arc<S>,
    calculator: ScoreCalculator,
    events: broadcast::Sender<ReportEvent>,
}

impl<S> ScoutingService<S>
where
    S: ReportSink + 'static,
{
    pub fn new(sink: Arc<S>, rules: ScoringRules) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            sink,
            calculator: ScoreCalculator::new(rules),
            events,
        }
    }

    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }

    /// Live score for an in-progress form.
    pub fn preview(&self, answers: &AnswerSet) -> ScoreBreakdown {
        self.calculator.score(answers)
    }

    /// Receives an event for every report saved or deleted through this service.
    pub fn subscribe(&self) -> broadcast::Receiver<ReportEvent> {
        self.events.subscribe()
    }

    /// Validate, score, and persist a submission.
    pub fn save(&self, submission: ReportSubmission) -> Result<Report, ScoutingServiceError> {
        self.save_at(submission, Utc::now())
    }

    pub fn save_at(
        &self,
        submission: ReportSubmission,
        timestamp: DateTime<Utc>,
    ) -> Result<Report, ScoutingServiceError> {
        let team_number = submission.validate()?;
        let answers = submission.answer_set();
        let breakdown = self.calculator.score(&answers);

        if let Some(claimed) = submission.total_score {
            if claimed != breakdown.total {
                warn!(
                    team_number,
                    claimed,
                    computed = breakdown.total,
                    "client score disagrees with computed score; keeping computed"
                );
            }
        }

        let mut report = Report {
            id: next_report_id(timestamp),
            timestamp,
            team_number,
            team_name: submission.team_name.trim().to_string(),
            match_number: submission.match_number.trim().to_string(),
            match_type: submission.match_type,
            scouter_name: submission.scouter_name.trim().to_string(),
            schema_version: SCHEMA_VERSION,
            answers,
            total_score: breakdown.total,
        };

        let id = self.sink.append(report.clone())?;
        report.id = id;

        info!(
            report_id = %report.id,
            team_number,
            total_score = report.total_score,
            "scouting report saved"
        );
        let _ = self.events.send(ReportEvent::Saved {
            id: report.id.clone(),
            team_number,
        });

        Ok(report)
    }

    /// All reports, newest first.
    pub fn list_all(&self) -> Result<Vec<Report>, ScoutingServiceError> {
        let mut reports = self.sink.read_all()?;
        aggregate::sort_newest_first(&mut reports);
        Ok(reports)
    }

    pub fn list_by_team(&self, team_number: u32) -> Result<Vec<Report>, ScoutingServiceError> {
        let mut reports: Vec<Report> = self
            .sink
            .read_all()?
            .into_iter()
            .filter(|report| report.team_number == team_number)
            .collect();
        aggregate::sort_newest_first(&mut reports);
        Ok(reports)
    }

    /// Fetch a single report. Unlike [`Self::delete`], a missing id is an error here.
    pub fn get(&self, id: &ReportId) -> Result<Report, ScoutingServiceError> {
        self.sink
            .read_all()?
            .into_iter()
            .find(|report| &report.id == id)
            .ok_or_else(|| ScoutingServiceError::NotFound(id.clone()))
    }

    /// Teams ranked by average score.
    pub fn aggregate_by_team(&self) -> Result<Vec<TeamAggregate>, ScoutingServiceError> {
        Ok(aggregate::aggregate_by_team(self.sink.read_all()?))
    }

    /// Aggregate for one team, if it has any reports.
    pub fn team(&self, team_number: u32) -> Result<Option<TeamAggregate>, ScoutingServiceError> {
        let reports = self.list_by_team(team_number)?;
        Ok(aggregate::aggregate_by_team(reports).into_iter().next())
    }

    pub fn search(&self, term: &str) -> Result<Vec<TeamAggregate>, ScoutingServiceError> {
        let term = SearchTerm::new(term);
        Ok(aggregate::search_teams(self.aggregate_by_team()?, &term))
    }

    pub fn search_reports(&self, term: &str) -> Result<Vec<Report>, ScoutingServiceError> {
        let term = SearchTerm::new(term);
        Ok(aggregate::search_reports(self.sink.read_all()?, &term))
    }

    /// Remove a report. Deleting an id that is not stored succeeds without changes.
    pub fn delete(&self, id: &ReportId) -> Result<(), ScoutingServiceError> {
        if self.sink.delete(id)? {
            info!(report_id = %id, "scouting report deleted");
            let _ = self.events.send(ReportEvent::Deleted { id: id.clone() });
        } else {
            debug!(report_id = %id, "delete requested for unknown report");
        }
        Ok(())
    }

    /// Recomputes every stored total and returns the reports whose cached total drifted.
    pub fn audit(&self) -> Result<Vec<ScoreDrift>, ScoutingServiceError> {
        let drift: Vec<ScoreDrift> = self
            .list_all()?
            .into_iter()
            .filter_map(|report| {
                let computed_total = self.calculator.score(&report.answers).total;
                (computed_total != report.total_score).then(|| ScoreDrift {
                    id: report.id,
                    team_number: report.team_number,
                    stored_total: report.total_score,
                    computed_total,
                })
            })
            .collect();

        if !drift.is_empty() {
            warn!(reports = drift.len(), "stored scores drifted from computed scores");
        }
        Ok(drift)
    }
}

/// Error raised by the scouting service.
#[derive(Debug, thiserror::Error)]
pub enum ScoutingServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error("report {0} not found")]
    NotFound(ReportId),
}
