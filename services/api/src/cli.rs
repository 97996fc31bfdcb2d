use crate::commands::{run_reports, run_score, ReportsCommand, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use scout_engine::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Match Scouting Engine",
    about = "Score scouting forms and rank teams from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a raw form payload without saving it
    Score(ScoreArgs),
    /// Inspect and manage stored scouting reports
    Reports {
        /// Override the configured report store path
        #[arg(long, global = true)]
        store: Option<PathBuf>,
        #[command(subcommand)]
        command: ReportsCommand,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured report store path
    #[arg(long)]
    pub(crate) store: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Reports { store, command } => run_reports(store, command),
    }
}
