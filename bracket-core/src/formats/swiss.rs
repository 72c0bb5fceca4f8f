//! Swiss system - pair teams with similar records each round
//!
//! Records are explicit state handed to the pairing step. Generation starts
//! every team at 0-0 and pairs all rounds from those zeroed records, so each
//! round repeats the first-round pairing. `repair_round` re-pairs a round
//! that has not started from records tallied out of earlier results.

use rustc_hash::FxHashSet;
use std::sync::Arc;

use super::{match_id, round_id, FormatGenerator};
use crate::bracket::{BracketData, BracketType, Match, RoundData};
use crate::config::BracketConfig;
use crate::error::{EngineError, EngineResult};
use crate::records::{self, TeamRecord};
use crate::seeding;
use crate::team::{Team, TeamId};

/// Swiss generator
pub struct Swiss;

impl FormatGenerator for Swiss {
    fn bracket_type(&self) -> BracketType {
        BracketType::Swiss
    }

    fn rounds(&self, teams: &[Arc<Team>], _config: &BracketConfig) -> Vec<RoundData> {
        let num_rounds = swiss_rounds(teams.len());
        let records: Vec<TeamRecord> = teams.iter().cloned().map(TeamRecord::new).collect();
        let history = PairingHistory::default();

        (0..num_rounds)
            .map(|r| {
                let mut round = RoundData::new(round_id(r), r, format!("Round {}", r + 1));
                round.matches = build_matches(&round, pair_round(&records, &history));
                round
            })
            .collect()
    }
}

/// `ceil(log2(n))` rounds, none for fewer than two teams
pub fn swiss_rounds(team_count: usize) -> usize {
    if team_count < 2 {
        0
    } else {
        seeding::rounds_for(team_count)
    }
}

/// Pairs already played, keyed order-independently
#[derive(Clone, Debug, Default)]
pub struct PairingHistory {
    played: FxHashSet<(TeamId, TeamId)>,
}

impl PairingHistory {
    pub fn record(&mut self, a: &TeamId, b: &TeamId) {
        self.played.insert(pair_key(a, b));
    }

    pub fn has_played(&self, a: &TeamId, b: &TeamId) -> bool {
        self.played.contains(&pair_key(a, b))
    }

    pub fn len(&self) -> usize {
        self.played.len()
    }

    pub fn is_empty(&self) -> bool {
        self.played.is_empty()
    }
}

fn pair_key(a: &TeamId, b: &TeamId) -> (TeamId, TeamId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// Pair one round.
///
/// Teams are sorted by wins minus losses (stable) and each unused team takes
/// the next unused team after it, skipping opponents already met while any
/// fresh opponent remains. An odd team out gets a bye (`None` opponent).
pub fn pair_round(
    records: &[TeamRecord],
    history: &PairingHistory,
) -> Vec<(Arc<Team>, Option<Arc<Team>>)> {
    let mut order = records.to_vec();
    records::sort_by_differential(&mut order);

    let mut used = vec![false; order.len()];
    let mut pairs = Vec::with_capacity(order.len().div_ceil(2));

    for i in 0..order.len() {
        if used[i] {
            continue;
        }
        used[i] = true;

        let team = &order[i].team;
        let open: Vec<usize> = (i + 1..order.len()).filter(|&j| !used[j]).collect();
        let opponent = open
            .iter()
            .copied()
            .find(|&j| !history.has_played(&team.id, &order[j].team.id))
            .or_else(|| open.first().copied());

        match opponent {
            Some(j) => {
                used[j] = true;
                pairs.push((team.clone(), Some(order[j].team.clone())));
            }
            None => pairs.push((team.clone(), None)),
        }
    }

    pairs
}

fn build_matches(round: &RoundData, pairs: Vec<(Arc<Team>, Option<Arc<Team>>)>) -> Vec<Match> {
    pairs
        .into_iter()
        .enumerate()
        .map(|(i, (home, away))| {
            let mut m = round.new_match(match_id(round.round_index, i));
            m.match_index = i;
            m.with_teams(Some(home), away)
        })
        .collect()
}

/// Re-pair a round that has no completed matches from the records and
/// meetings of every earlier round.
pub fn repair_round(bracket: &BracketData, round_index: usize) -> EngineResult<BracketData> {
    if bracket.bracket_type() != BracketType::Swiss {
        return Err(EngineError::WrongFormat {
            expected: BracketType::Swiss,
            found: bracket.bracket_type(),
        });
    }

    let position = bracket
        .rounds()
        .iter()
        .position(|r| r.round_index == round_index)
        .ok_or(EngineError::UnknownRound(round_index))?;
    let target = &bracket.rounds()[position];

    if bracket.round_matches(target).any(|m| m.is_completed()) {
        return Err(EngineError::RoundStarted(round_index));
    }

    let records = records::tally_rounds(bracket, |r| r.round_index < round_index);
    let mut history = PairingHistory::default();
    for round in bracket.rounds().iter().filter(|r| r.round_index < round_index) {
        for m in bracket.round_matches(round) {
            if let (Some(a), Some(b)) = (&m.team1, &m.team2) {
                history.record(&a.id, &b.id);
            }
        }
    }

    let mut round = RoundData::new(target.id.0.clone(), target.round_index, target.name.clone());
    let matches = build_matches(&round, pair_round(&records, &history));
    round.matches = matches;

    tracing::debug!(
        round = round_index,
        matches = round.matches.len(),
        prior_meetings = history.len(),
        "re-paired swiss round"
    );

    let mut next = bracket.clone();
    next.replace_round(position, round.matches);
    next.bump_version();
    Ok(next)
}
