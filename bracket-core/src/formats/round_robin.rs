//! Round robin - circle method scheduling

use std::sync::Arc;

use super::{match_id, round_id, FormatGenerator};
use crate::bracket::{BracketType, RoundData};
use crate::config::BracketConfig;
use crate::team::Team;

/// Everyone-plays-everyone generator
pub struct RoundRobin;

impl FormatGenerator for RoundRobin {
    fn bracket_type(&self) -> BracketType {
        BracketType::RoundRobin
    }

    fn rounds(&self, teams: &[Arc<Team>], _config: &BracketConfig) -> Vec<RoundData> {
        let n = teams.len();
        let num_rounds = if n % 2 == 0 { n.saturating_sub(1) } else { n };

        // None is the bye placeholder for odd counts
        let mut circle: Vec<Option<&Arc<Team>>> = teams.iter().map(Some).collect();
        if n % 2 == 1 {
            circle.push(None);
        }
        let positions = circle.len();

        let mut rounds = Vec::with_capacity(num_rounds);
        for r in 0..num_rounds {
            let mut round = RoundData::new(round_id(r), r, format!("Round {}", r + 1));

            for i in 0..positions / 2 {
                // The team facing the placeholder rests this round
                if let (Some(home), Some(away)) = (circle[i], circle[positions - 1 - i]) {
                    let m = round
                        .new_match(match_id(r, round.matches.len()))
                        .with_teams(Some(home.clone()), Some(away.clone()));
                    round.matches.push(m);
                }
            }

            // First position stays fixed, everyone else moves one seat
            circle[1..].rotate_right(1);
            rounds.push(round);
        }

        tracing::debug!(teams = n, rounds = num_rounds, "built round robin schedule");
        rounds
    }
}
