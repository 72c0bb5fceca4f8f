//! Report command - record a match result and advance the winner
//!
//! Also hosts `repair-swiss`, which re-pairs an unstarted Swiss round from
//! the results recorded so far.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use bracket_core::{
    repair_round, try_update_match_result, update_match_result, BracketData, MatchResult, TeamId,
};

use crate::io;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ReportArgs {
    /// Bracket snapshot JSON file
    #[arg(long, value_name = "FILE")]
    pub bracket: PathBuf,

    /// Match id, e.g. match-0-1
    #[arg(long = "match", value_name = "ID")]
    pub match_id: String,

    /// Winning team id
    #[arg(long, value_name = "TEAM")]
    pub winner: Option<String>,

    /// Score of the team in slot 1
    #[arg(long)]
    pub score1: Option<u32>,

    /// Score of the team in slot 2
    #[arg(long)]
    pub score2: Option<u32>,

    /// Reject inconsistent results and unknown match ids instead of
    /// recording results as given and skipping unknown ids
    #[arg(long)]
    pub strict: bool,

    /// Write the updated bracket here (defaults to overwriting --bracket)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the updated bracket to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

impl ReportArgs {
    fn result(&self) -> MatchResult {
        MatchResult {
            team1_score: self.score1,
            team2_score: self.score2,
            winner: self.winner.as_deref().map(TeamId::from),
            completed: true,
        }
    }

    fn destination(&self) -> Option<PathBuf> {
        if self.stdout {
            None
        } else {
            Some(self.output.clone().unwrap_or_else(|| self.bracket.clone()))
        }
    }
}

#[derive(Args)]
pub struct RepairArgs {
    /// Swiss bracket snapshot JSON file
    #[arg(long, value_name = "FILE")]
    pub bracket: PathBuf,

    /// Index of the round to re-pair
    #[arg(long)]
    pub round: usize,

    /// Write the updated bracket here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run report command
pub fn run(args: ReportArgs) -> Result<()> {
    let bracket = io::load_bracket(&args.bracket)?;
    let updated = apply_report(&bracket, &args)?;
    io::write_bracket(&updated, args.destination().as_deref())
}

/// Run repair-swiss command
pub fn run_repair(args: RepairArgs) -> Result<()> {
    let bracket = io::load_bracket(&args.bracket)?;
    let repaired = repair_round(&bracket, args.round)?;
    tracing::info!("Re-paired round {}", args.round);
    io::write_bracket(&repaired, args.output.as_deref())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn apply_report(bracket: &BracketData, args: &ReportArgs) -> Result<BracketData> {
    let result = args.result();

    if args.strict {
        let updated = try_update_match_result(bracket, &args.match_id, result)?;
        log_outcome(&updated, &args.match_id);
        return Ok(updated);
    }

    if !bracket.contains_match(&args.match_id) {
        tracing::warn!("Match {} not found, bracket left unchanged", args.match_id);
        return Ok(bracket.clone());
    }
    let updated = update_match_result(bracket, &args.match_id, result);
    log_outcome(&updated, &args.match_id);
    Ok(updated)
}

fn log_outcome(bracket: &BracketData, match_id: &str) {
    let Some(m) = bracket.match_by_id(match_id) else {
        return;
    };
    match (m.winner(), &m.next_match_id) {
        (Some(winner), Some(next)) => {
            tracing::info!("{} wins {}, advancing to {}", winner.display_name(), m.id, next)
        }
        (Some(winner), None) => tracing::info!("{} wins {}", winner.display_name(), m.id),
        (None, _) => tracing::info!("Recorded result for {}", m.id),
    }
    if let Some(champion) = bracket.champion() {
        tracing::info!("Champion: {}", champion.display_name());
    }
}
