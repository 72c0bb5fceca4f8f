//! Bracket CLI - Command-line interface
//!
//! Commands:
//! - generate: Build a bracket from a team list
//! - report: Record a match result and advance the winner
//! - show: Print rounds and matches
//! - standings: Print win/loss records
//! - repair-swiss: Re-pair an unstarted Swiss round from results so far

mod generate_cmd;
mod io;
mod report_cmd;
mod view_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bracket")]
#[command(about = "Tournament bracket generator and result tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a bracket from a team list
    Generate(generate_cmd::GenerateArgs),
    /// Record a match result
    Report(report_cmd::ReportArgs),
    /// Print a bracket
    Show(view_cmd::ShowArgs),
    /// Print standings
    Standings(view_cmd::StandingsArgs),
    /// Re-pair a Swiss round from recorded results
    RepairSwiss(report_cmd::RepairArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => generate_cmd::run(args),
        Commands::Report(args) => report_cmd::run(args),
        Commands::Show(args) => view_cmd::run_show(args),
        Commands::Standings(args) => view_cmd::run_standings(args),
        Commands::RepairSwiss(args) => report_cmd::run_repair(args),
    }
}
