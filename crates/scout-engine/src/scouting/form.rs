//! Parsing of raw form payloads into a typed [`AnswerSet`].
//!
//! The form surface is loosely typed: radio groups arrive as numbers or numeric strings,
//! flags as booleans or `"yes"`/`"no"`, and multi-selects as string lists. Parsing happens
//! once, here, and never fails: absent or malformed values fall back to the neutral value
//! so a half-filled form can still be scored live.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::answers::{
    AnswerSet, AutoRankingPoint, AutonomousAnswers, ConsiderationAnswers, EndgameAnswers,
    Movement, Positioning, TeamworkObservation, TeleopAnswers, Tier,
};

/// Question identifiers of the form schema, see [`super::answers::SCHEMA_VERSION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKey {
    AutoFunctional,
    AutoLeaveZone,
    AutoScoresHub,
    AutoFuelAmount,
    AutoAccuracy,
    AutoClimb,
    AutoRankingPoints,
    TeleopDefensive,
    DefenseType,
    DefenseEfficiency,
    FuelCapacity,
    CycleSpeed,
    ScoreEfficiency,
    Positioning,
    InactiveHub,
    Movement,
    EndgameClimb,
    ClimbLevel,
    ClimbSpeed,
    EndgameRankingPoint,
    Penalties,
    PenaltyType,
    PenaltyOther,
    Teamwork,
    TeamworkObservations,
    Consistency,
    Reliability,
    Comments,
}

impl QuestionKey {
    pub const ALL: [Self; 28] = [
        Self::AutoFunctional,
        Self::AutoLeaveZone,
        Self::AutoScoresHub,
        Self::AutoFuelAmount,
        Self::AutoAccuracy,
        Self::AutoClimb,
        Self::AutoRankingPoints,
        Self::TeleopDefensive,
        Self::DefenseType,
        Self::DefenseEfficiency,
        Self::FuelCapacity,
        Self::CycleSpeed,
        Self::ScoreEfficiency,
        Self::Positioning,
        Self::InactiveHub,
        Self::Movement,
        Self::EndgameClimb,
        Self::ClimbLevel,
        Self::ClimbSpeed,
        Self::EndgameRankingPoint,
        Self::Penalties,
        Self::PenaltyType,
        Self::PenaltyOther,
        Self::Teamwork,
        Self::TeamworkObservations,
        Self::Consistency,
        Self::Reliability,
        Self::Comments,
    ];

    /// Field name used by the form surface.
    pub const fn form_name(self) -> &'static str {
        match self {
            Self::AutoFunctional => "autoFunctional",
            Self::AutoLeaveZone => "autoLeaveZone",
            Self::AutoScoresHub => "autoScoresHub",
            Self::AutoFuelAmount => "autoFuelAmount",
            Self::AutoAccuracy => "autoAccuracy",
            Self::AutoClimb => "autoClimb",
            Self::AutoRankingPoints => "autoRP",
            Self::TeleopDefensive => "teleopDefensive",
            Self::DefenseType => "defenseType",
            Self::DefenseEfficiency => "defenseEfficiency",
            Self::FuelCapacity => "fuelCapacity",
            Self::CycleSpeed => "cycleSpeed",
            Self::ScoreEfficiency => "scoreEfficiency",
            Self::Positioning => "positioning",
            Self::InactiveHub => "inactiveHub",
            Self::Movement => "movement",
            Self::EndgameClimb => "endgameClimb",
            Self::ClimbLevel => "climbLevel",
            Self::ClimbSpeed => "climbSpeed",
            Self::EndgameRankingPoint => "endgameRP",
            Self::Penalties => "penalties",
            Self::PenaltyType => "penaltyType",
            Self::PenaltyOther => "penaltyOther",
            Self::Teamwork => "teamwork",
            Self::TeamworkObservations => "teamworkObs",
            Self::Consistency => "consistency",
            Self::Reliability => "reliability",
            Self::Comments => "scouterComments",
        }
    }

    pub fn from_form_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.form_name() == name)
    }
}

/// Raw form submission keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormPayload(pub BTreeMap<String, Value>);

impl FormPayload {
    pub fn get(&self, key: QuestionKey) -> Option<&Value> {
        self.0.get(key.form_name())
    }

    pub fn insert(&mut self, key: QuestionKey, value: impl Into<Value>) {
        self.0.insert(key.form_name().to_string(), value.into());
    }

    /// Field names that are not part of the schema; they are ignored by [`Self::answers`].
    pub fn unknown_fields(&self) -> Vec<&str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|name| QuestionKey::from_form_name(name).is_none())
            .collect()
    }

    pub fn answers(&self) -> AnswerSet {
        let tier = |key| self.get(key).and_then(parse_tier);
        let flag = |key| self.get(key).map(parse_flag).unwrap_or(false);
        let text = |key| self.get(key).map(parse_text).unwrap_or_default();

        let autonomous = AutonomousAnswers {
            functional: flag(QuestionKey::AutoFunctional),
            leave_start_zone: flag(QuestionKey::AutoLeaveZone),
            scores_in_hub: flag(QuestionKey::AutoScoresHub),
            fuel_amount: tier(QuestionKey::AutoFuelAmount),
            accuracy: tier(QuestionKey::AutoAccuracy),
            climb: flag(QuestionKey::AutoClimb),
            ranking_points: self.tags(QuestionKey::AutoRankingPoints, |tag| match tag {
                "auto" => Some(AutoRankingPoint::Auto),
                "score" => Some(AutoRankingPoint::Score),
                _ => None,
            }),
        };

        let teleop = if flag(QuestionKey::TeleopDefensive) {
            TeleopAnswers::Defensive {
                defense_type: tier(QuestionKey::DefenseType),
                defense_efficiency: tier(QuestionKey::DefenseEfficiency),
            }
        } else {
            TeleopAnswers::Offensive {
                fuel_capacity: tier(QuestionKey::FuelCapacity),
                cycle_speed: tier(QuestionKey::CycleSpeed),
                score_efficiency: tier(QuestionKey::ScoreEfficiency),
                positioning: self.tags(QuestionKey::Positioning, |tag| match tag {
                    "hub" => Some(Positioning::Hub),
                    "long" => Some(Positioning::Long),
                    "both" => Some(Positioning::Both),
                    _ => None,
                }),
                inactive_hub: tier(QuestionKey::InactiveHub),
                movement: self.tags(QuestionKey::Movement, |tag| match tag {
                    "ramp" => Some(Movement::Ramp),
                    "sides" => Some(Movement::Sides),
                    _ => None,
                }),
            }
        };

        let endgame = EndgameAnswers {
            climb_attempted: flag(QuestionKey::EndgameClimb),
            climb_level: tier(QuestionKey::ClimbLevel),
            climb_speed: tier(QuestionKey::ClimbSpeed),
            ranking_point: tier(QuestionKey::EndgameRankingPoint),
        };

        let considerations = ConsiderationAnswers {
            penalties: tier(QuestionKey::Penalties),
            penalty_types: self.tags(QuestionKey::PenaltyType, |tag| Some(tag.to_string())),
            penalty_other: text(QuestionKey::PenaltyOther),
            teamwork: tier(QuestionKey::Teamwork),
            teamwork_observations: self.tags(QuestionKey::TeamworkObservations, |tag| {
                match tag {
                    "space" => Some(TeamworkObservation::Space),
                    "cycles" => Some(TeamworkObservation::Cycles),
                    "endgame" => Some(TeamworkObservation::Endgame),
                    "conflict" => Some(TeamworkObservation::Conflict),
                    _ => None,
                }
            }),
            consistency: tier(QuestionKey::Consistency),
            reliability: tier(QuestionKey::Reliability),
            comments: text(QuestionKey::Comments),
        };

        AnswerSet {
            autonomous,
            teleop,
            endgame,
            considerations,
        }
    }

    fn tags<T, F>(&self, key: QuestionKey, mut map: F) -> BTreeSet<T>
    where
        T: Ord,
        F: FnMut(&str) -> Option<T>,
    {
        let raw: Vec<&str> = match self.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(single)) => vec![single.as_str()],
            _ => Vec::new(),
        };

        raw.into_iter()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .filter_map(|tag| map(tag.to_ascii_lowercase().as_str()))
            .collect()
    }
}

/// Reads a radio option code. Strings are read like a browser's `parseInt`: an optional
/// sign followed by leading digits, anything after them ignored.
fn parse_tier(value: &Value) -> Tier {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.trunc() as i64))
            .and_then(|raw| i32::try_from(raw).ok()),
        Value::String(raw) => parse_leading_int(raw),
        _ => None,
    }
}

fn parse_leading_int(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i32>().ok().map(|value| sign * value)
}

fn parse_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n > 0.0).unwrap_or(false),
        Value::String(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "on" => true,
            other => parse_leading_int(other).map(|n| n > 0).unwrap_or(false),
        },
        _ => false,
    }
}

fn parse_text(value: &Value) -> String {
    match value {
        Value::String(raw) => raw.trim().to_string(),
        _ => String::new(),
    }
}
