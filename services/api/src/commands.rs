use crate::infra::ConfiguredSink;
use clap::{Args, Subcommand};
use scout_engine::config::{AppConfig, StorageBackend, StorageConfig};
use scout_engine::error::AppError;
use scout_engine::scouting::export::write_reports_csv;
use scout_engine::scouting::{
    FormPayload, Report, ReportId, ReportSubmission, ScoreBreakdown, ScoreCalculator,
    ScoringRules, ScoutingService, TeamAggregate,
};
use scout_engine::scouting::views::{ReportDetailView, TeamCardView};
use scout_engine::telemetry;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding a raw form payload (field name to value)
    pub(crate) form: PathBuf,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ReportsCommand {
    /// List reports, newest first
    List(ListArgs),
    /// Rank teams by average score
    Teams(TeamsArgs),
    /// Show one report with its score breakdown
    Show { id: String },
    /// Validate, score, and save a report submission from a JSON file
    Submit { submission: PathBuf },
    /// Delete a report; unknown ids are ignored
    Delete { id: String },
    /// Write all reports to a CSV file
    Export { output: PathBuf },
    /// Recompute stored scores and list any that drifted
    Audit,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Only show reports for this team number
    #[arg(long)]
    pub(crate) team: Option<u32>,
    /// Filter by team number digits or team name
    #[arg(long)]
    pub(crate) search: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TeamsArgs {
    /// Filter by team number digits or team name
    #[arg(long)]
    pub(crate) search: Option<String>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = fs::read(&args.form)?;
    let form: FormPayload = serde_json::from_slice(&raw)?;

    let unknown = form.unknown_fields();
    if !unknown.is_empty() {
        println!("Ignored fields: {}", unknown.join(", "));
    }

    let breakdown = ScoreCalculator::new(ScoringRules::default()).score(&form.answers());
    render_breakdown(&breakdown);
    Ok(())
}

pub(crate) fn run_reports(store: Option<PathBuf>, command: ReportsCommand) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    telemetry::init_cli(&config.telemetry)?;

    let service = reports_service(&mut config.storage, store);
    execute(&service, command)
}

fn reports_service(
    storage: &mut StorageConfig,
    store: Option<PathBuf>,
) -> ScoutingService<ConfiguredSink> {
    if let Some(path) = store {
        storage.override_path(path);
    }
    let sink = ConfiguredSink::from_config(storage);
    if storage.backend == StorageBackend::Memory {
        warn!("reports command is using the memory store; changes end with this process");
    }
    ScoutingService::new(Arc::new(sink), ScoringRules::default())
}

fn execute(
    service: &ScoutingService<ConfiguredSink>,
    command: ReportsCommand,
) -> Result<(), AppError> {
    match command {
        ReportsCommand::List(ListArgs { team, search }) => {
            let reports = match (team, search) {
                (Some(team_number), _) => service.list_by_team(team_number)?,
                (None, Some(term)) => service.search_reports(&term)?,
                (None, None) => service.list_all()?,
            };
            render_report_list(&reports);
        }
        ReportsCommand::Teams(TeamsArgs { search }) => {
            let teams = match search {
                Some(term) => service.search(&term)?,
                None => service.aggregate_by_team()?,
            };
            render_team_ranking(&teams);
        }
        ReportsCommand::Show { id } => {
            let report = service.get(&ReportId(id))?;
            let breakdown = service.preview(&report.answers);
            render_report_detail(&ReportDetailView::new(&report, &breakdown), &breakdown);
        }
        ReportsCommand::Submit { submission } => {
            let raw = fs::read(&submission)?;
            let submission: ReportSubmission = serde_json::from_slice(&raw)?;
            let report = service.save(submission)?;
            println!(
                "Saved report {} for team #{} ({} pts)",
                report.id, report.team_number, report.total_score
            );
        }
        ReportsCommand::Delete { id } => {
            let id = ReportId(id);
            service.delete(&id)?;
            println!("Report {id} removed (if it existed)");
        }
        ReportsCommand::Export { output } => {
            let reports = service.list_all()?;
            let file = fs::File::create(&output)?;
            let calculator = ScoreCalculator::new(ScoringRules::default());
            let written = write_reports_csv(file, &reports, &calculator)?;
            println!("Exported {written} report(s) to {}", output.display());
        }
        ReportsCommand::Audit => {
            let drift = service.audit()?;
            if drift.is_empty() {
                println!("All stored scores match their answers");
            } else {
                println!("{} report(s) drifted:", drift.len());
                for entry in drift {
                    println!(
                        "  {} team #{}: stored {} vs computed {}",
                        entry.id, entry.team_number, entry.stored_total, entry.computed_total
                    );
                }
            }
        }
    }
    Ok(())
}

fn render_breakdown(breakdown: &ScoreBreakdown) {
    println!("Autonomous:      {:>5}", breakdown.autonomous);
    println!("Teleoperated:    {:>5}", breakdown.teleop);
    println!("Endgame:         {:>5}", breakdown.endgame);
    println!("Considerations:  {:>5}", breakdown.considerations);
    println!("Total:           {:>5}", breakdown.total);

    if !breakdown.components.is_empty() {
        println!("\nContributions");
        for component in &breakdown.components {
            println!(
                "  {:<15} {:<22} {:>+4}",
                component.section.label(),
                component.question.form_name(),
                component.points
            );
        }
    }
}

fn render_report_list(reports: &[Report]) {
    if reports.is_empty() {
        println!("No reports found");
        return;
    }

    for report in reports {
        println!(
            "{}  #{:<5} {:<28} {:<18} {:>5} pts  scouted by {} at {}",
            report.id,
            report.team_number,
            report.team_name,
            report.match_label(),
            report.total_score,
            report.scouter_name,
            report.timestamp.format("%Y-%m-%d %H:%M")
        );
    }
}

fn render_team_ranking(teams: &[TeamAggregate]) {
    if teams.is_empty() {
        println!("No teams scouted yet");
        return;
    }

    for (rank, team) in teams.iter().enumerate() {
        let card = TeamCardView::from(team);
        println!(
            "{:>3}. #{:<5} {:<28} {:>6.1} avg  ({} report{})",
            rank + 1,
            card.team_number,
            card.team_name,
            card.average_score,
            card.report_count,
            if card.report_count == 1 { "" } else { "s" }
        );
    }
}

fn render_report_detail(view: &ReportDetailView, breakdown: &ScoreBreakdown) {
    println!(
        "#{} - {}\n{}\nScouter: {}\nRole: {}  Reliability: {}\n",
        view.card.team_number,
        view.card.team_name,
        view.card.match_label,
        view.card.scouter_name,
        if view.defensive { "defensive" } else { "offensive" },
        view.reliability_label
    );
    render_breakdown(breakdown);

    let comments = &view.answers.considerations.comments;
    if !comments.is_empty() {
        println!("\nComments: {comments}");
    }
}
