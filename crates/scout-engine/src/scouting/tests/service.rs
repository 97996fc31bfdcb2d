use super::common::*;
use crate::scouting::answers::AnswerSet;
use crate::scouting::report::{Report, ReportId, ValidationError};
use crate::scouting::scoring::{compute_score, ScoringRules};
use crate::scouting::service::{ReportEvent, ScoutingService, ScoutingServiceError};
use crate::scouting::store::{MemoryReportSink, ReportSink, SinkError};
use crate::scouting::SCHEMA_VERSION;
use std::sync::Arc;

#[test]
fn save_computes_total_and_ignores_client_score() {
    let (service, sink) = build_service();

    let mut payload = submission(254, " The Cheesy Poofs ", offensive_answers());
    payload.total_score = Some(9_999);
    let report = service
        .save_at(payload, kickoff())
        .expect("submission saves");

    assert_eq!(report.total_score, 110);
    assert_eq!(report.total_score, compute_score(&report.answers).total);
    assert_eq!(report.team_name, "The Cheesy Poofs");
    assert_eq!(report.schema_version, SCHEMA_VERSION);
    assert_eq!(report.timestamp, kickoff());

    let stored = sink.read_all().expect("sink readable");
    assert_eq!(stored, vec![report]);
}

#[test]
fn save_rejects_invalid_submissions_before_touching_sink() {
    let service = ScoutingService::new(Arc::new(UnavailableSink), ScoringRules::default());

    let mut payload = submission(118, "Robonauts", AnswerSet::default());
    payload.team_number = None;

    match service.save(payload) {
        Err(ScoutingServiceError::Validation(ValidationError::MissingTeamNumber)) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn save_surfaces_sink_failures() {
    let service = ScoutingService::new(Arc::new(UnavailableSink), ScoringRules::default());

    match service.save(submission(118, "Robonauts", AnswerSet::default())) {
        Err(ScoutingServiceError::Sink(SinkError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline");
        }
        other => panic!("expected sink error, got {other:?}"),
    }
}

#[test]
fn saved_report_takes_the_id_assigned_by_the_sink() {
    let sink = Arc::new(RekeyingSink::default());
    let service = ScoutingService::new(sink.clone(), ScoringRules::default());

    let report = service
        .save(submission(118, "Robonauts", AnswerSet::default()))
        .expect("submission saves");

    assert_eq!(report.id, ReportId::from("remote-0"));
    assert_eq!(service.get(&report.id).expect("report readable"), report);
}

#[test]
fn list_all_is_newest_first_and_empty_store_is_not_an_error() {
    let (service, _) = build_service();
    assert!(service.list_all().expect("empty list").is_empty());
    assert!(service.aggregate_by_team().expect("empty ranking").is_empty());

    service
        .save_at(submission(118, "Robonauts", AnswerSet::default()), kickoff())
        .expect("first save");
    service
        .save_at(
            submission(254, "The Cheesy Poofs", AnswerSet::default()),
            minutes_after_kickoff(30),
        )
        .expect("second save");
    service
        .save_at(
            submission(118, "Robonauts", AnswerSet::default()),
            minutes_after_kickoff(10),
        )
        .expect("third save");

    let teams: Vec<u32> = service
        .list_all()
        .expect("list succeeds")
        .iter()
        .map(|report| report.team_number)
        .collect();
    assert_eq!(teams, vec![254, 118, 118]);

    let robonauts = service.list_by_team(118).expect("team list");
    assert_eq!(robonauts.len(), 2);
    assert_eq!(robonauts[0].timestamp, minutes_after_kickoff(10));
}

#[test]
fn aggregate_by_team_ranks_by_average() {
    let (service, _) = build_service();
    for (team_number, name, penalties, minutes) in [
        (118, "Robonauts", 50, 0),
        (118, "Robonauts", 70, 1),
        (254, "The Cheesy Poofs", 90, 2),
    ] {
        service
            .save_at(
                submission(team_number, name, penalty_only_answers(penalties)),
                minutes_after_kickoff(minutes),
            )
            .expect("save succeeds");
    }

    let ranking: Vec<(u32, f64)> = service
        .aggregate_by_team()
        .expect("aggregate succeeds")
        .iter()
        .map(|team| (team.team_number, team.average_score))
        .collect();
    assert_eq!(ranking, vec![(254, 90.0), (118, 60.0)]);

    let team = service.team(118).expect("lookup succeeds").expect("team present");
    assert_eq!(team.report_count(), 2);
    assert!(service.team(9999).expect("lookup succeeds").is_none());
}

#[test]
fn delete_is_idempotent() {
    let (service, _) = build_service();
    let report = service
        .save(submission(118, "Robonauts", AnswerSet::default()))
        .expect("save succeeds");

    service.delete(&report.id).expect("delete succeeds");
    assert!(service
        .list_all()
        .expect("list succeeds")
        .iter()
        .all(|stored| stored.id != report.id));

    service.delete(&report.id).expect("repeat delete is a no-op");
}

#[test]
fn get_reports_missing_ids() {
    let (service, _) = build_service();
    match service.get(&ReportId::from("missing")) {
        Err(ScoutingServiceError::NotFound(id)) => assert_eq!(id, ReportId::from("missing")),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn search_matches_team_numbers_and_names() {
    let (service, _) = build_service();
    for (team_number, name) in [(254, "The Cheesy Poofs"), (1254, "Hawkeyes"), (118, "Robonauts")] {
        service
            .save(submission(team_number, name, AnswerSet::default()))
            .expect("save succeeds");
    }

    let mut by_number: Vec<u32> = service
        .search("25")
        .expect("search succeeds")
        .iter()
        .map(|team| team.team_number)
        .collect();
    by_number.sort_unstable();
    assert_eq!(by_number, vec![254, 1254]);

    let by_name = service.search_reports("hawk").expect("search succeeds");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].team_name, "Hawkeyes");
}

#[test]
fn subscribers_see_saves_and_deletes() {
    let (service, _) = build_service();
    let mut events = service.subscribe();

    let report = service
        .save(submission(118, "Robonauts", AnswerSet::default()))
        .expect("save succeeds");
    service.delete(&report.id).expect("delete succeeds");
    service.delete(&report.id).expect("repeat delete succeeds");

    assert_eq!(
        events.try_recv().expect("saved event"),
        ReportEvent::Saved {
            id: report.id.clone(),
            team_number: 118,
        }
    );
    assert_eq!(
        events.try_recv().expect("deleted event"),
        ReportEvent::Deleted { id: report.id }
    );
    assert!(events.try_recv().is_err(), "no event for a no-op delete");
}

#[test]
fn audit_flags_only_drifted_reports() {
    let (service, sink) = build_service();
    let saved = service
        .save(submission(118, "Robonauts", offensive_answers()))
        .expect("save succeeds");
    assert!(service.audit().expect("audit succeeds").is_empty());

    let mut tampered: Report = saved.clone();
    tampered.id = ReportId::from("imported");
    tampered.total_score = 3;
    sink.append(tampered).expect("append succeeds");

    let drift = service.audit().expect("audit succeeds");
    assert_eq!(drift.len(), 1);
    assert_eq!(drift[0].id, ReportId::from("imported"));
    assert_eq!(drift[0].stored_total, 3);
    assert_eq!(drift[0].computed_total, 110);
}

#[test]
fn preview_matches_saved_total() {
    let service = ScoutingService::new(
        Arc::new(MemoryReportSink::default()),
        ScoringRules::default(),
    );
    let answers = defensive_answers();
    let preview = service.preview(&answers);
    let saved = service
        .save(submission(33, "Killer Bees", answers))
        .expect("save succeeds");
    assert_eq!(preview.total, saved.total_score);
}
