//! Single elimination - seeded knockout with byes padding to a power of two

use std::sync::Arc;

use super::{match_id, match_ref, round_id, FormatGenerator};
use crate::bracket::{BracketType, RoundData, Slot};
use crate::config::{BracketConfig, SeedPlacement};
use crate::seeding;
use crate::team::Team;

/// Knockout bracket generator
pub struct SingleElimination;

impl FormatGenerator for SingleElimination {
    fn bracket_type(&self) -> BracketType {
        BracketType::SingleElimination
    }

    fn rounds(&self, teams: &[Arc<Team>], config: &BracketConfig) -> Vec<RoundData> {
        knockout_rounds(teams, config.seeded, config.placement)
    }
}

/// Knockout rounds with every match linked to its successor.
///
/// Round 0 takes its teams from the seeded slot placement; a match missing a
/// side is flagged as a bye but its lone team is not carried forward here.
pub(crate) fn knockout_rounds(
    teams: &[Arc<Team>],
    seeded: bool,
    placement: SeedPlacement,
) -> Vec<RoundData> {
    let total_rounds = seeding::rounds_for(teams.len());
    let size = 1usize << total_rounds;

    let ordered = if seeded {
        seeding::seed_order(teams)
    } else {
        teams.to_vec()
    };
    let slots = seeding::place(&ordered, size, placement);

    let mut rounds = Vec::with_capacity(total_rounds);
    for r in 0..total_rounds {
        let mut round = RoundData::new(round_id(r), r, round_name(r, total_rounds));
        let count = size >> (r + 1);

        for i in 0..count {
            let mut m = round.new_match(match_id(r, i));
            if r == 0 {
                m = m.with_teams(slots[2 * i].clone(), slots[2 * i + 1].clone());
            }
            if r + 1 < total_rounds {
                m = m.feeding(match_ref(r + 1, i / 2), Slot::for_index(i));
            }
            round.matches.push(m);
        }

        rounds.push(round);
    }

    tracing::debug!(
        teams = teams.len(),
        size,
        rounds = total_rounds,
        "built knockout rounds"
    );
    rounds
}

/// "Finals", "Semifinals", "Quarterfinals", then "Round of N"
pub(crate) fn round_name(round: usize, total_rounds: usize) -> String {
    match total_rounds - round {
        1 => "Finals".to_string(),
        2 => "Semifinals".to_string(),
        3 => "Quarterfinals".to_string(),
        remaining => format!("Round of {}", 1usize << remaining),
    }
}
