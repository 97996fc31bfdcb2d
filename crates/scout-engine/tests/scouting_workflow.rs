use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use scout_engine::scouting::{
    compute_score, FormPayload, JsonFileReportSink, MatchType, QuestionKey, ReportSubmission,
    ScoringRules, ScoutingService,
};

fn form_submission(team_number: u32, team_name: &str, form: &FormPayload) -> ReportSubmission {
    ReportSubmission {
        team_number: Some(team_number),
        team_name: team_name.to_string(),
        match_number: "Q7".to_string(),
        match_type: MatchType::Playoff,
        scouter_name: "Rafa".to_string(),
        answers: Default::default(),
        form: Some(form.clone()),
        total_score: None,
    }
}

#[test]
fn reports_round_trip_through_the_file_store() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("reports.json");
    let start = Utc
        .with_ymd_and_hms(2026, 4, 2, 13, 0, 0)
        .single()
        .expect("valid timestamp");

    let mut strong = FormPayload::default();
    strong.insert(QuestionKey::AutoFunctional, "yes");
    strong.insert(QuestionKey::AutoScoresHub, "yes");
    strong.insert(QuestionKey::AutoFuelAmount, "8");
    strong.insert(QuestionKey::AutoRankingPoints, vec!["auto", "score"]);
    strong.insert(QuestionKey::EndgameClimb, "yes");
    strong.insert(QuestionKey::ClimbLevel, "10");
    strong.insert(QuestionKey::Reliability, "5");

    let mut penalized = FormPayload::default();
    penalized.insert(QuestionKey::Penalties, "-10");

    {
        let service = ScoutingService::new(
            Arc::new(JsonFileReportSink::new(&path)),
            ScoringRules::default(),
        );
        service
            .save_at(form_submission(254, "The Cheesy Poofs", &strong), start)
            .expect("first save");
        service
            .save_at(
                form_submission(1254, "Hawkeyes", &penalized),
                start + Duration::minutes(3),
            )
            .expect("second save");
    }

    let service = ScoutingService::new(
        Arc::new(JsonFileReportSink::new(&path)),
        ScoringRules::default(),
    );
    let reports = service.list_all().expect("reports load from disk");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].team_number, 1254);
    assert_eq!(reports[0].total_score, -10);
    for report in &reports {
        assert_eq!(compute_score(&report.answers).total, report.total_score);
    }
    assert!(service.audit().expect("audit runs").is_empty());

    let ranking: Vec<u32> = service
        .aggregate_by_team()
        .expect("aggregate runs")
        .iter()
        .map(|team| team.team_number)
        .collect();
    assert_eq!(ranking, vec![254, 1254]);

    let hawkeyes = service.search("hawk").expect("search runs");
    assert_eq!(hawkeyes.len(), 1);

    service.delete(&reports[0].id).expect("delete runs");
    service.delete(&reports[0].id).expect("repeat delete runs");
    let remaining = service.list_all().expect("reports reload");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].team_number, 254);
}
