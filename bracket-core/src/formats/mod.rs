//! Format generators - one per bracket type behind a common capability
//!
//! Level 2 - Phases

mod double;
mod round_robin;
mod single;
pub mod swiss;

use std::sync::Arc;

use crate::bracket::{BracketType, MatchId, RoundData};
use crate::config::BracketConfig;
use crate::team::Team;

pub use double::DoubleElimination;
pub use round_robin::RoundRobin;
pub use single::SingleElimination;
pub use swiss::Swiss;

/// Turns a team list into the rounds of one bracket format
pub trait FormatGenerator: Send + Sync {
    /// Format this generator produces
    fn bracket_type(&self) -> BracketType;

    /// Rounds in play order
    fn rounds(&self, teams: &[Arc<Team>], config: &BracketConfig) -> Vec<RoundData>;
}

/// Generator for a bracket type
pub fn generator_for(bracket_type: BracketType) -> &'static dyn FormatGenerator {
    match bracket_type {
        BracketType::SingleElimination => &SingleElimination,
        BracketType::DoubleElimination => &DoubleElimination,
        BracketType::RoundRobin => &RoundRobin,
        BracketType::Swiss => &Swiss,
    }
}

pub(crate) fn round_id(round: usize) -> String {
    format!("round-{}", round)
}

pub(crate) fn match_id(round: usize, index: usize) -> String {
    format!("match-{}-{}", round, index)
}

pub(crate) fn match_ref(round: usize, index: usize) -> MatchId {
    MatchId(match_id(round, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_for_matches_tag() {
        for t in BracketType::ALL {
            assert_eq!(generator_for(t).bracket_type(), t);
        }
    }
}
