use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::report::Report;

/// Derived summary for every report of one team. Built fresh on each read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAggregate {
    pub team_number: u32,
    pub team_name: String,
    pub reports: Vec<Report>,
    pub average_score: f64,
}

impl TeamAggregate {
    /// Builds the aggregate for a non-empty group; returns `None` for an empty one.
    fn from_group(team_number: u32, mut reports: Vec<Report>) -> Option<Self> {
        sort_newest_first(&mut reports);
        let newest = reports.first()?;
        let team_name = newest.team_name.clone();
        let sum: i64 = reports.iter().map(|report| i64::from(report.total_score)).sum();
        let average_score = sum as f64 / reports.len() as f64;

        Some(Self {
            team_number,
            team_name,
            reports,
            average_score,
        })
    }

    pub fn report_count(&self) -> usize {
        self.reports.len()
    }

    pub fn best_score(&self) -> Option<i32> {
        self.reports.iter().map(|report| report.total_score).max()
    }
}

fn newest_first(a: &Report, b: &Report) -> Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| id_sequence_cmp(&b.id.0, &a.id.0))
}

/// Compares ids by prefix, then by trailing digits as a number, so `rpt-1-9999` sorts
/// before `rpt-1-10000`.
fn id_sequence_cmp(a: &str, b: &str) -> Ordering {
    let (a_prefix, a_digits) = split_trailing_digits(a);
    let (b_prefix, b_digits) = split_trailing_digits(b);
    let a_digits = a_digits.trim_start_matches('0');
    let b_digits = b_digits.trim_start_matches('0');

    a_prefix
        .cmp(b_prefix)
        .then_with(|| a_digits.len().cmp(&b_digits.len()))
        .then_with(|| a_digits.cmp(b_digits))
        .then_with(|| a.cmp(b))
}

fn split_trailing_digits(id: &str) -> (&str, &str) {
    let start = id.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    id.split_at(start)
}

/// Orders reports newest first; reports with equal timestamps fall back to id order, with
/// numeric suffixes compared by value.
pub fn sort_newest_first(reports: &mut [Report]) {
    reports.sort_by(newest_first);
}

/// Groups reports by team and ranks the teams by average score, best first. Teams with
/// equal averages are ordered by team number.
pub fn aggregate_by_team(reports: Vec<Report>) -> Vec<TeamAggregate> {
    let mut groups: HashMap<u32, Vec<Report>> = HashMap::new();
    for report in reports {
        groups.entry(report.team_number).or_default().push(report);
    }

    let mut teams: Vec<TeamAggregate> = groups
        .into_iter()
        .filter_map(|(team_number, group)| TeamAggregate::from_group(team_number, group))
        .collect();

    teams.sort_by(|a, b| {
        b.average_score
            .total_cmp(&a.average_score)
            .then_with(|| a.team_number.cmp(&b.team_number))
    });
    teams
}

/// Case-insensitive search over team number digits and team name. A blank term matches
/// everything.
#[derive(Debug, Clone)]
pub struct SearchTerm {
    needle: String,
}

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, team_number: u32, team_name: &str) -> bool {
        self.is_blank()
            || team_number.to_string().contains(&self.needle)
            || team_name.to_lowercase().contains(&self.needle)
    }
}

pub fn search_reports(reports: Vec<Report>, term: &SearchTerm) -> Vec<Report> {
    let mut matched: Vec<Report> = reports
        .into_iter()
        .filter(|report| term.matches(report.team_number, &report.team_name))
        .collect();
    sort_newest_first(&mut matched);
    matched
}

pub fn search_teams(teams: Vec<TeamAggregate>, term: &SearchTerm) -> Vec<TeamAggregate> {
    teams
        .into_iter()
        .filter(|team| term.matches(team.team_number, &team.team_name))
        .collect()
}
