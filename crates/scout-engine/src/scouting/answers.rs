use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Version of the question schema stamped on every stored report.
///
/// Renaming or renumbering a [`QuestionKey`] changes how stored answers are read back,
/// so any such change must bump this value.
pub const SCHEMA_VERSION: u32 = 1;

/// Selected option code of a radio group. `None` means the question was left unanswered.
pub type Tier = Option<i32>;

pub(crate) fn tier_points(tier: Tier) -> i32 {
    tier.unwrap_or(0)
}

/// Structured collection of a report's form selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    #[serde(default)]
    pub autonomous: AutonomousAnswers,
    #[serde(default)]
    pub teleop: TeleopAnswers,
    #[serde(default)]
    pub endgame: EndgameAnswers,
    #[serde(default)]
    pub considerations: ConsiderationAnswers,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutonomousAnswers {
    pub functional: bool,
    pub leave_start_zone: bool,
    pub scores_in_hub: bool,
    pub fuel_amount: Tier,
    pub accuracy: Tier,
    pub climb: bool,
    pub ranking_points: BTreeSet<AutoRankingPoint>,
}

/// Ranking-point conditions reached during the autonomous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoRankingPoint {
    Auto,
    Score,
}

/// Teleop answers branch on the robot's role: defensive robots are never scored on
/// offensive criteria and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum TeleopAnswers {
    Defensive {
        #[serde(default)]
        defense_type: Tier,
        #[serde(default)]
        defense_efficiency: Tier,
    },
    Offensive {
        #[serde(default)]
        fuel_capacity: Tier,
        #[serde(default)]
        cycle_speed: Tier,
        #[serde(default)]
        score_efficiency: Tier,
        #[serde(default)]
        positioning: BTreeSet<Positioning>,
        #[serde(default)]
        inactive_hub: Tier,
        #[serde(default)]
        movement: BTreeSet<Movement>,
    },
}

impl Default for TeleopAnswers {
    fn default() -> Self {
        Self::Offensive {
            fuel_capacity: None,
            cycle_speed: None,
            score_efficiency: None,
            positioning: BTreeSet::new(),
            inactive_hub: None,
            movement: BTreeSet::new(),
        }
    }
}

impl TeleopAnswers {
    pub fn is_defensive(&self) -> bool {
        matches!(self, Self::Defensive { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Positioning {
    Hub,
    Long,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Ramp,
    Sides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndgameAnswers {
    pub climb_attempted: bool,
    pub climb_level: Tier,
    pub climb_speed: Tier,
    pub ranking_point: Tier,
}

/// Qualitative observations; always scored regardless of the other groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsiderationAnswers {
    pub penalties: Tier,
    pub penalty_types: BTreeSet<String>,
    pub penalty_other: String,
    pub teamwork: Tier,
    pub teamwork_observations: BTreeSet<TeamworkObservation>,
    pub consistency: Tier,
    pub reliability: Tier,
    pub comments: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamworkObservation {
    Space,
    Cycles,
    Endgame,
    Conflict,
}

/// Coarse reliability bucket shown alongside a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityLevel {
    High,
    Average,
    Low,
}

impl ReliabilityLevel {
    pub fn from_tier(tier: Tier) -> Self {
        match tier_points(tier) {
            points if points > 0 => Self::High,
            points if points < 0 => Self::Low,
            _ => Self::Average,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Average => "average",
            Self::Low => "low",
        }
    }
}
