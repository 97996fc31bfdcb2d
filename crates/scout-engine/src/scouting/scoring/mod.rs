mod config;
mod rules;

pub use config::ScoringRules;

use super::answers::AnswerSet;
use super::form::QuestionKey;
use serde::{Deserialize, Serialize};

/// Form section a contribution belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSection {
    Autonomous,
    Teleop,
    Endgame,
    Considerations,
}

impl ScoreSection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Autonomous => "Autonomous",
            Self::Teleop => "Teleoperated",
            Self::Endgame => "Endgame",
            Self::Considerations => "Considerations",
        }
    }
}

/// Stateless calculator applying a point table to answer sets.
#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator {
    rules: ScoringRules,
}

impl ScoreCalculator {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Scores an answer set. Never fails: incomplete answers simply contribute nothing.
    pub fn score(&self, answers: &AnswerSet) -> ScoreBreakdown {
        let (components, totals) = rules::score_answers(answers, &self.rules);

        ScoreBreakdown {
            autonomous: totals.autonomous,
            teleop: totals.teleop,
            endgame: totals.endgame,
            considerations: totals.considerations,
            total: totals
                .autonomous
                .saturating_add(totals.teleop)
                .saturating_add(totals.endgame)
                .saturating_add(totals.considerations),
            components,
        }
    }
}

/// Scores `answers` with the canonical point table.
pub fn compute_score(answers: &AnswerSet) -> ScoreBreakdown {
    ScoreCalculator::default().score(answers)
}

/// Discrete contribution to a score, kept so stored totals can be audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub section: ScoreSection,
    pub question: QuestionKey,
    pub points: i32,
}

/// Total score of an answer set broken down per section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub autonomous: i32,
    pub teleop: i32,
    pub endgame: i32,
    pub considerations: i32,
    pub total: i32,
    pub components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    pub fn section(&self, section: ScoreSection) -> i32 {
        match section {
            ScoreSection::Autonomous => self.autonomous,
            ScoreSection::Teleop => self.teleop,
            ScoreSection::Endgame => self.endgame,
            ScoreSection::Considerations => self.considerations,
        }
    }
}
