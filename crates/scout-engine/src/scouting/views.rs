use chrono::{DateTime, Utc};
use serde::Serialize;

use super::aggregate::TeamAggregate;
use super::answers::{AnswerSet, ReliabilityLevel};
use super::report::{MatchType, Report, ReportId};
use super::scoring::{ScoreBreakdown, ScoreSection};

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamCardView {
    pub team_number: u32,
    pub team_name: String,
    pub report_count: usize,
    pub average_score: f64,
}

impl From<&TeamAggregate> for TeamCardView {
    fn from(team: &TeamAggregate) -> Self {
        Self {
            team_number: team.team_number,
            team_name: team.team_name.clone(),
            report_count: team.report_count(),
            average_score: round_tenths(team.average_score),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportCardView {
    pub id: ReportId,
    pub team_number: u32,
    pub team_name: String,
    pub match_type: MatchType,
    pub match_label: String,
    pub scouter_name: String,
    pub timestamp: DateTime<Utc>,
    pub total_score: i32,
}

impl From<&Report> for ReportCardView {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.clone(),
            team_number: report.team_number,
            team_name: report.team_name.clone(),
            match_type: report.match_type,
            match_label: report.match_label(),
            scouter_name: report.scouter_name.clone(),
            timestamp: report.timestamp,
            total_score: report.total_score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionScoreEntry {
    pub section: ScoreSection,
    pub section_label: &'static str,
    pub points: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportDetailView {
    #[serde(flatten)]
    pub card: ReportCardView,
    pub defensive: bool,
    pub reliability: ReliabilityLevel,
    pub reliability_label: &'static str,
    pub sections: Vec<SectionScoreEntry>,
    pub answers: AnswerSet,
}

impl ReportDetailView {
    /// `breakdown` must be computed from `report.answers`.
    pub fn new(report: &Report, breakdown: &ScoreBreakdown) -> Self {
        let reliability = ReliabilityLevel::from_tier(report.answers.considerations.reliability);
        let sections = [
            ScoreSection::Autonomous,
            ScoreSection::Teleop,
            ScoreSection::Endgame,
            ScoreSection::Considerations,
        ]
        .into_iter()
        .map(|section| SectionScoreEntry {
            section,
            section_label: section.label(),
            points: breakdown.section(section),
        })
        .collect();

        Self {
            card: ReportCardView::from(report),
            defensive: report.answers.teleop.is_defensive(),
            reliability,
            reliability_label: reliability.label(),
            sections,
            answers: report.answers.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamDetailView {
    #[serde(flatten)]
    pub card: TeamCardView,
    pub best_score: Option<i32>,
    pub reports: Vec<ReportCardView>,
}

impl From<&TeamAggregate> for TeamDetailView {
    fn from(team: &TeamAggregate) -> Self {
        Self {
            card: TeamCardView::from(team),
            best_score: team.best_score(),
            reports: team.reports.iter().map(ReportCardView::from).collect(),
        }
    }
}
