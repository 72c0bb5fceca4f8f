//! File loading and saving for teams and bracket snapshots
//!
//! Level 4 - Utilities

use std::path::Path;

use anyhow::{bail, Context, Result};
use bracket_core::{BracketData, Team};

/// Load a team list.
///
/// Accepts a JSON array of team objects, a JSON array of names, or plain
/// text with one name per line (blank lines and `#` comments skipped).
/// Generated ids are `team-1`, `team-2`, ...
pub fn load_teams(path: &Path) -> Result<Vec<Team>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read team file: {}", path.display()))?;
    parse_teams(&content).with_context(|| format!("Invalid team file: {}", path.display()))
}

pub fn parse_teams(content: &str) -> Result<Vec<Team>> {
    // Try full team records first
    if let Ok(teams) = serde_json::from_str::<Vec<Team>>(content) {
        return Ok(teams);
    }

    // Then a bare list of names
    if let Ok(names) = serde_json::from_str::<Vec<String>>(content) {
        return Ok(named_teams(names));
    }

    if content.trim_start().starts_with('[') {
        // Looked like JSON; report the real parse error
        let teams: Vec<Team> = serde_json::from_str(content)?;
        return Ok(teams);
    }

    let names: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        bail!("no teams found");
    }
    Ok(named_teams(names))
}

fn named_teams(names: Vec<String>) -> Vec<Team> {
    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| Team::new(format!("team-{}", i + 1), name))
        .collect()
}

/// Load a bracket snapshot
pub fn load_bracket(path: &Path) -> Result<BracketData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bracket: {}", path.display()))?;
    let bracket: BracketData = serde_json::from_str(&content)
        .with_context(|| format!("Invalid bracket JSON: {}", path.display()))?;
    Ok(bracket)
}

/// Write a bracket snapshot to `path`, or stdout when absent
pub fn write_bracket(bracket: &BracketData, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(bracket)?;
    match path {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write bracket: {}", path.display()))?;
            tracing::info!("Wrote bracket to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
