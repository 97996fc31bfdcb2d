use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answers::AnswerSet;
use super::form::FormPayload;

/// Identifier wrapper for stored reports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub String);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReportId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    #[default]
    Qualifier,
    Playoff,
}

impl MatchType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Qualifier => "Qualifier",
            Self::Playoff => "Playoff",
        }
    }
}

/// One completed scouting submission for one team in one match. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub timestamp: DateTime<Utc>,
    pub team_number: u32,
    pub team_name: String,
    pub match_number: String,
    pub match_type: MatchType,
    pub scouter_name: String,
    pub schema_version: u32,
    pub answers: AnswerSet,
    pub total_score: i32,
}

impl Report {
    pub fn match_label(&self) -> String {
        format!("{} - {}", self.match_type.label(), self.match_number)
    }
}

/// Client payload for a new report. Any client-computed score is advisory only.
///
/// Answers arrive either typed in `answers` or as the raw `form` payload accepted by the
/// score preview; when `form` is present it is parsed and `answers` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSubmission {
    #[serde(default)]
    pub team_number: Option<u32>,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub match_number: String,
    #[serde(default)]
    pub match_type: MatchType,
    #[serde(default)]
    pub scouter_name: String,
    #[serde(default)]
    pub answers: AnswerSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<FormPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<i32>,
}

/// Submission rejected before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("team number is required")]
    MissingTeamNumber,
    #[error("team name is required")]
    MissingTeamName,
    #[error("match number is required")]
    MissingMatchNumber,
    #[error("scouter name is required")]
    MissingScouterName,
}

impl ReportSubmission {
    pub fn validate(&self) -> Result<u32, ValidationError> {
        let team_number = match self.team_number {
            Some(number) if number > 0 => number,
            _ => return Err(ValidationError::MissingTeamNumber),
        };
        if self.team_name.trim().is_empty() {
            return Err(ValidationError::MissingTeamName);
        }
        if self.match_number.trim().is_empty() {
            return Err(ValidationError::MissingMatchNumber);
        }
        if self.scouter_name.trim().is_empty() {
            return Err(ValidationError::MissingScouterName);
        }
        Ok(team_number)
    }

    /// Answers to score and store, parsed from `form` when one was sent.
    pub fn answer_set(&self) -> AnswerSet {
        match &self.form {
            Some(form) => form.answers(),
            None => self.answers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ReportSubmission {
        ReportSubmission {
            team_number: Some(254),
            team_name: "The Cheesy Poofs".to_string(),
            match_number: "12".to_string(),
            match_type: MatchType::Qualifier,
            scouter_name: "Ana".to_string(),
            ..ReportSubmission::default()
        }
    }

    #[test]
    fn validate_returns_team_number() {
        assert_eq!(submission().validate(), Ok(254));
    }

    #[test]
    fn validate_rejects_missing_or_zero_team_number() {
        let mut missing = submission();
        missing.team_number = None;
        assert_eq!(missing.validate(), Err(ValidationError::MissingTeamNumber));

        let mut zero = submission();
        zero.team_number = Some(0);
        assert_eq!(zero.validate(), Err(ValidationError::MissingTeamNumber));
    }

    #[test]
    fn validate_rejects_blank_text_fields() {
        let mut blank_name = submission();
        blank_name.team_name = "   ".to_string();
        assert_eq!(blank_name.validate(), Err(ValidationError::MissingTeamName));

        let mut blank_scouter = submission();
        blank_scouter.scouter_name.clear();
        assert_eq!(
            blank_scouter.validate(),
            Err(ValidationError::MissingScouterName)
        );
    }

    #[test]
    fn raw_form_takes_precedence_over_typed_answers() {
        let parsed: ReportSubmission = serde_json::from_value(serde_json::json!({
            "team_number": 254,
            "answers": { "autonomous": { "functional": false } },
            "form": { "autoFunctional": "yes", "penalties": "-10" },
        }))
        .expect("submission parses");

        let answers = parsed.answer_set();
        assert!(answers.autonomous.functional);
        assert_eq!(answers.considerations.penalties, Some(-10));

        let typed = submission();
        assert_eq!(typed.answer_set(), typed.answers);
    }

    #[test]
    fn match_type_deserializes_from_snake_case() {
        let parsed: MatchType = serde_json::from_str("\"playoff\"").expect("valid match type");
        assert_eq!(parsed, MatchType::Playoff);
        assert_eq!(parsed.label(), "Playoff");
    }
}
