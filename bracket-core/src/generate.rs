//! Bracket assembly - the single entry point for generation
//!
//! Level 1 - Orchestration

use std::sync::Arc;

use crate::advance::resolve_byes;
use crate::bracket::{BracketData, BracketType};
use crate::config::BracketConfig;
use crate::error::EngineResult;
use crate::formats::generator_for;
use crate::seeding;
use crate::team::Team;

/// Generate a bracket with default options.
///
/// `seeded` sorts teams by seed before they are placed.
pub fn generate(bracket_type: BracketType, teams: &[Team], seeded: bool) -> BracketData {
    generate_with(bracket_type, teams, &BracketConfig::seeded(seeded))
}

/// Generate from a format tag ("single", "double", "roundrobin", "swiss")
pub fn generate_tagged(tag: &str, teams: &[Team], seeded: bool) -> EngineResult<BracketData> {
    Ok(generate(tag.parse()?, teams, seeded))
}

/// Generate a bracket.
///
/// # Arguments
/// * `bracket_type` - Format to build
/// * `teams` - Competitors in registration order
/// * `config` - Seeding, draw and bye options
pub fn generate_with(
    bracket_type: BracketType,
    teams: &[Team],
    config: &BracketConfig,
) -> BracketData {
    let mut entrants: Vec<Arc<Team>> = teams.iter().cloned().map(Arc::new).collect();
    if let Some(seed) = config.shuffle_seed {
        entrants = seeding::shuffled(&entrants, seed);
    }

    let rounds = generator_for(bracket_type).rounds(&entrants, config);
    let bracket = BracketData::from_rounds(bracket_type, teams.len(), rounds);

    tracing::debug!(
        format = %bracket_type,
        teams = teams.len(),
        rounds = bracket.rounds().len(),
        matches = bracket.match_count(),
        "generated bracket"
    );

    if config.resolve_byes {
        resolve_byes(&bracket)
    } else {
        bracket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::MatchState;
    use crate::config::SeedPlacement;
    use crate::error::EngineError;
    use crate::team::Seed;

    fn teams(n: usize) -> Vec<Team> {
        (1..=n)
            .map(|i| Team::new(format!("t{}", i), format!("Team {}", i)))
            .collect()
    }

    #[test]
    fn test_generate_tagged_rejects_unknown() {
        assert_eq!(
            generate_tagged("ladder", &teams(4), false),
            Err(EngineError::UnsupportedBracketType("ladder".to_string()))
        );
        let bracket = generate_tagged("double", &teams(4), false).unwrap();
        assert_eq!(bracket.bracket_type(), BracketType::DoubleElimination);
    }

    #[test]
    fn test_total_teams_recorded() {
        for t in BracketType::ALL {
            assert_eq!(generate(t, &teams(6), false).total_teams(), 6);
        }
    }

    #[test]
    fn test_shuffle_changes_draw_deterministically() {
        let config = BracketConfig::default().with_shuffle_seed(99);
        let a = generate_with(BracketType::SingleElimination, &teams(16), &config);
        let b = generate_with(BracketType::SingleElimination, &teams(16), &config);
        assert_eq!(a, b);

        let plain = generate(BracketType::SingleElimination, &teams(16), false);
        assert_eq!(a.match_count(), plain.match_count());
        assert_eq!(a.teams().len(), 16);
    }

    #[test]
    fn test_resolve_byes_option() {
        let config = BracketConfig::default().with_resolve_byes(true);
        let bracket = generate_with(BracketType::SingleElimination, &teams(6), &config);
        assert!(bracket
            .matches()
            .filter(|m| m.bye)
            .all(|m| m.state() == MatchState::Completed));
    }

    #[test]
    fn test_standard_placement_pairs_top_against_bottom() {
        let mut list = teams(8);
        for (i, t) in list.iter_mut().enumerate() {
            t.seed = Some(Seed::from(i as u32 + 1));
        }
        let config = BracketConfig::seeded(true).with_placement(SeedPlacement::Standard);
        let bracket = generate_with(BracketType::SingleElimination, &list, &config);
        let first = bracket.match_by_id("match-0-0").unwrap();
        assert_eq!(first.team1.as_ref().unwrap().id.as_str(), "t1");
        assert_eq!(first.team2.as_ref().unwrap().id.as_str(), "t8");
    }
}
