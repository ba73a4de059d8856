use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jobscout::error::AppError;

use crate::demo::run_rank;
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "JobScout",
    about = "Run the job-search assistant API or rank job batches from the command line",
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
    /// Rank a CSV batch of job postings against a rubric and print the result
    Rank(RankArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the in-memory listings feed from a CSV export
    #[arg(long)]
    pub(crate) jobs_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// CSV export of job postings to rank
    #[arg(long)]
    pub(crate) jobs_csv: PathBuf,
    /// Rubric JSON file (defaults to the stock rubric)
    #[arg(long)]
    pub(crate) rubric: Option<PathBuf>,
    /// Show only matches at or above the auto-apply threshold
    #[arg(long)]
    pub(crate) priority_only: bool,
    /// Print the matched-signal breakdown for each ranked job
    #[arg(long)]
    pub(crate) explain: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
    }
}
