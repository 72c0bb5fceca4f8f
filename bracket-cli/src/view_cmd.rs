//! Show and standings commands - read-only views of a bracket snapshot

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use bracket_core::{standings, BracketData, Match, MatchState, TeamRecord};

use crate::io;

#[derive(Args)]
pub struct ShowArgs {
    /// Bracket snapshot JSON file
    #[arg(long, value_name = "FILE")]
    pub bracket: PathBuf,
}

#[derive(Args)]
pub struct StandingsArgs {
    /// Bracket snapshot JSON file
    #[arg(long, value_name = "FILE")]
    pub bracket: PathBuf,

    /// Output standings as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run show command
pub fn run_show(args: ShowArgs) -> Result<()> {
    let bracket = io::load_bracket(&args.bracket)?;
    print!("{}", render_bracket(&bracket));
    Ok(())
}

/// Run standings command
pub fn run_standings(args: StandingsArgs) -> Result<()> {
    let bracket = io::load_bracket(&args.bracket)?;
    let records = standings(&bracket);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print!("{}", render_standings(&records));
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn render_bracket(bracket: &BracketData) -> String {
    let mut out = format!(
        "=== {} bracket, {} teams ===\n",
        bracket.bracket_type(),
        bracket.total_teams()
    );

    for round in bracket.rounds() {
        out.push_str(&format!("\n{} [{}]\n", round.name, round.id));
        for m in bracket.round_matches(round) {
            out.push_str(&format!("  {}\n", render_match(m)));
        }
    }

    if bracket.bracket_type().is_elimination() {
        if let Some(champion) = bracket.champion() {
            out.push_str(&format!("\nChampion: {}\n", champion.display_name()));
        }
    }
    out
}

fn render_match(m: &Match) -> String {
    let side = |team: Option<&str>| team.unwrap_or("-").to_string();
    let team1 = side(m.team1.as_deref().map(|t| t.display_name()));
    let team2 = side(m.team2.as_deref().map(|t| t.display_name()));

    let status = match m.state() {
        MatchState::Completed => {
            let score = match m.result.as_ref().map(|r| (r.team1_score, r.team2_score)) {
                Some((Some(a), Some(b))) => format!(" {}-{}", a, b),
                _ => String::new(),
            };
            let winner = m
                .winner()
                .map(|t| format!(", {} wins", t.display_name()))
                .unwrap_or_default();
            format!("done{}{}", score, winner)
        }
        _ if m.bye => "bye".to_string(),
        MatchState::Ready => "ready".to_string(),
        MatchState::Partial => "waiting".to_string(),
        MatchState::Empty => "empty".to_string(),
    };

    let next = m
        .next_match_id
        .as_ref()
        .map(|id| format!(" -> {}", id))
        .unwrap_or_default();

    format!("{:<20} {} vs {} ({}){}", m.id.as_str(), team1, team2, status, next)
}

fn render_standings(records: &[TeamRecord]) -> String {
    let mut out = String::from("\n=== Standings ===\n");
    for (rank, r) in records.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<24} W {:>2}  L {:>2}  PF {:>4}  PA {:>4}\n",
            rank + 1,
            r.team.display_name(),
            r.wins,
            r.losses,
            r.points_for,
            r.points_against
        ));
    }
    out
}
