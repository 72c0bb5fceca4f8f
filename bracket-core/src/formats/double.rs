//! Double elimination - winners bracket, consolation rounds, grand finals
//!
//! The winners bracket is a seeded knockout. Consolation rounds are created
//! empty: losers of winners-bracket matches are not routed into them, so
//! their slots are filled by the caller or by advancement inside the losers
//! bracket itself.

use std::sync::Arc;

use super::single::knockout_rounds;
use super::FormatGenerator;
use crate::bracket::{BracketType, MatchId, RoundData, Slot};
use crate::config::BracketConfig;
use crate::team::Team;

pub(crate) const GRAND_FINALS_ROUND: &str = "grand-finals";
pub(crate) const GRAND_FINALS_MATCH: &str = "grand-finals-match";

/// Double elimination generator
pub struct DoubleElimination;

impl FormatGenerator for DoubleElimination {
    fn bracket_type(&self) -> BracketType {
        BracketType::DoubleElimination
    }

    fn rounds(&self, teams: &[Arc<Team>], config: &BracketConfig) -> Vec<RoundData> {
        let mut winners = knockout_rounds(teams, true, config.placement);
        let grand_finals_id = MatchId::new(GRAND_FINALS_MATCH);

        let winners_counts: Vec<usize> = winners.iter().map(|r| r.matches.len()).collect();
        let losers = losers_rounds(&winners_counts, &grand_finals_id);

        if let Some(last) = winners.last_mut().and_then(|r| r.matches.first_mut()) {
            last.next_match_id = Some(grand_finals_id.clone());
            last.next_match_slot = Some(Slot::Team1);
        }

        let mut grand_finals =
            RoundData::new(GRAND_FINALS_ROUND, winners.len(), "Grand Finals").finals();
        let deciding = grand_finals.new_match(GRAND_FINALS_MATCH);
        grand_finals.matches.push(deciding);

        tracing::debug!(
            winners_rounds = winners.len(),
            losers_rounds = losers.len(),
            "built double elimination rounds"
        );

        winners.extend(losers);
        winners.push(grand_finals);
        winners
    }
}

/// One consolation round per winners round except the last, each with
/// half as many matches as its winners round (at least one). Losers rounds
/// halve in turn, so match `i` feeds match `i / 2` of the next one, and the
/// losers final feeds the second grand finals slot.
fn losers_rounds(winners_counts: &[usize], grand_finals: &MatchId) -> Vec<RoundData> {
    let total = winners_counts.len().saturating_sub(1);
    let counts: Vec<usize> = winners_counts[..total]
        .iter()
        .map(|&c| (c / 2).max(1))
        .collect();

    let mut rounds = Vec::with_capacity(total);
    for (r, &count) in counts.iter().enumerate() {
        let mut round = RoundData::new(
            format!("losers-round-{}", r),
            r,
            format!("Losers Round {}", r + 1),
        )
        .consolation();

        for i in 0..count {
            let m = round.new_match(losers_match_id(r, i));
            let m = match counts.get(r + 1) {
                Some(&next_count) if next_count < count => {
                    m.feeding(MatchId(losers_match_id(r + 1, i / 2)), Slot::for_index(i))
                }
                Some(_) => m.feeding(MatchId(losers_match_id(r + 1, i)), Slot::Team1),
                None => m.feeding(grand_finals.clone(), Slot::Team2),
            };
            round.matches.push(m);
        }
        rounds.push(round);
    }
    rounds
}

fn losers_match_id(round: usize, index: usize) -> String {
    format!("losers-match-{}-{}", round, index)
}
