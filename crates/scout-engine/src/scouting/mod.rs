//! Match scouting: answer parsing, score calculation, report storage, and team rankings.

pub mod aggregate;
pub mod answers;
pub mod export;
pub mod form;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod views;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate_by_team, SearchTerm, TeamAggregate};
pub use answers::{
    AnswerSet, AutoRankingPoint, AutonomousAnswers, ConsiderationAnswers, EndgameAnswers,
    Movement, Positioning, ReliabilityLevel, TeamworkObservation, TeleopAnswers, Tier,
    SCHEMA_VERSION,
};
pub use form::{FormPayload, QuestionKey};
pub use report::{MatchType, Report, ReportId, ReportSubmission, ValidationError};
pub use router::scouting_router;
pub use scoring::{
    compute_score, ScoreBreakdown, ScoreCalculator, ScoreComponent, ScoreSection, ScoringRules,
};
pub use service::{ReportEvent, ScoreDrift, ScoutingService, ScoutingServiceError};
pub use store::{JsonFileReportSink, MemoryReportSink, ReportSink, SinkError};
