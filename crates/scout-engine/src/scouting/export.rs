use std::io::Write;

use serde::Serialize;

use super::report::Report;
use super::scoring::ScoreCalculator;

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    #[serde(rename = "Report ID")]
    id: &'a str,
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Team Number")]
    team_number: u32,
    #[serde(rename = "Team Name")]
    team_name: &'a str,
    #[serde(rename = "Match")]
    match_label: String,
    #[serde(rename = "Scouter")]
    scouter_name: &'a str,
    #[serde(rename = "Role")]
    role: &'static str,
    #[serde(rename = "Autonomous")]
    autonomous: i32,
    #[serde(rename = "Teleop")]
    teleop: i32,
    #[serde(rename = "Endgame")]
    endgame: i32,
    #[serde(rename = "Considerations")]
    considerations: i32,
    #[serde(rename = "Total Score")]
    total_score: i32,
    #[serde(rename = "Comments")]
    comments: &'a str,
}

/// Writes one CSV row per report, with the section breakdown recomputed from its answers.
/// The `Total Score` column is the stored total. Returns the number of rows written.
pub fn write_reports_csv<W: Write>(
    writer: W,
    reports: &[Report],
    calculator: &ScoreCalculator,
) -> Result<usize, csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for report in reports {
        let breakdown = calculator.score(&report.answers);
        csv_writer.serialize(ReportRow {
            id: &report.id.0,
            timestamp: report.timestamp.to_rfc3339(),
            team_number: report.team_number,
            team_name: &report.team_name,
            match_label: report.match_label(),
            scouter_name: &report.scouter_name,
            role: if report.answers.teleop.is_defensive() {
                "defensive"
            } else {
                "offensive"
            },
            autonomous: breakdown.autonomous,
            teleop: breakdown.teleop,
            endgame: breakdown.endgame,
            considerations: breakdown.considerations,
            total_score: report.total_score,
            comments: &report.answers.considerations.comments,
        })?;
    }

    csv_writer.flush()?;
    Ok(reports.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scouting::answers::{AnswerSet, SCHEMA_VERSION};
    use crate::scouting::report::{MatchType, ReportId};
    use chrono::{TimeZone, Utc};

    #[test]
    fn writes_header_and_rows() {
        let mut answers = AnswerSet::default();
        answers.considerations.penalties = Some(-10);
        answers.considerations.comments = "tipped, twice".to_string();
        let report = Report {
            id: ReportId::from("rpt-1"),
            timestamp: Utc
                .with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
                .single()
                .expect("valid timestamp"),
            team_number: 118,
            team_name: "Robonauts".to_string(),
            match_number: "42".to_string(),
            match_type: MatchType::Playoff,
            scouter_name: "Duda".to_string(),
            schema_version: SCHEMA_VERSION,
            answers,
            total_score: -10,
        };

        let mut buffer = Vec::new();
        let written = write_reports_csv(&mut buffer, &[report], &ScoreCalculator::default())
            .expect("csv writes");
        assert_eq!(written, 1);

        let output = String::from_utf8(buffer).expect("utf8 output");
        let mut lines = output.lines();
        assert!(lines
            .next()
            .expect("header row")
            .starts_with("Report ID,Timestamp,Team Number"));
        let row = lines.next().expect("data row");
        assert!(row.contains("Playoff - 42"));
        assert!(row.contains("\"tipped, twice\""));
        assert!(row.contains(",-10,"));
    }
}
