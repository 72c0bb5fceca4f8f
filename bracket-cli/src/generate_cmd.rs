//! Generate command - build a bracket from a team list
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load teams, generate, write snapshot
//! - Level 4: configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use bracket_core::{generate_with, BracketConfig, BracketType, SeedPlacement};

use crate::io;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct GenerateArgs {
    /// Bracket format: single, double, roundrobin, swiss
    #[arg(long, value_parser = parse_format)]
    pub format: BracketType,

    /// Team file (JSON array or one name per line)
    #[arg(long, value_name = "FILE")]
    pub teams: PathBuf,

    /// Sort teams by seed before placement
    #[arg(long)]
    pub seeded: bool,

    /// Use 1-vs-N placement instead of sequential slot placement
    #[arg(long)]
    pub standard_seeding: bool,

    /// Shuffle the team order with this RNG seed before seeding
    #[arg(long, value_name = "SEED")]
    pub shuffle: Option<u64>,

    /// Complete first-round byes and advance their teams
    #[arg(long)]
    pub resolve_byes: bool,

    /// Write the bracket here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    fn config(&self) -> BracketConfig {
        let placement = if self.standard_seeding {
            SeedPlacement::Standard
        } else {
            SeedPlacement::Sequential
        };
        let config = BracketConfig::seeded(self.seeded)
            .with_placement(placement)
            .with_resolve_byes(self.resolve_byes);
        match self.shuffle {
            Some(seed) => config.with_shuffle_seed(seed),
            None => config,
        }
    }
}

pub fn parse_format(s: &str) -> Result<BracketType, String> {
    s.parse::<BracketType>().map_err(|e| e.to_string())
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run generate command
pub fn run(args: GenerateArgs) -> Result<()> {
    let teams = io::load_teams(&args.teams)?;
    let config = args.config();

    tracing::info!(
        "Generating {} bracket for {} teams (seeded={})",
        args.format,
        teams.len(),
        config.seeded
    );

    let bracket = generate_with(args.format, &teams, &config);

    tracing::info!(
        "Bracket has {} rounds and {} matches",
        bracket.rounds().len(),
        bracket.match_count()
    );

    io::write_bracket(&bracket, args.output.as_deref())
}
