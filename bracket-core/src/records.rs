//! Team records and standings tallied from completed results
//!
//! Level 3 - Steps

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::cmp::Reverse;
use std::sync::Arc;

use crate::bracket::{BracketData, Round};
use crate::team::{Team, TeamId};

/// Running record of one team
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub team: Arc<Team>,
    pub wins: u32,
    pub losses: u32,
    /// Completed matches against a real opponent
    pub played: u32,
    pub points_for: u64,
    pub points_against: u64,
}

impl TeamRecord {
    /// Zeroed record
    pub fn new(team: Arc<Team>) -> Self {
        Self {
            team,
            wins: 0,
            losses: 0,
            played: 0,
            points_for: 0,
            points_against: 0,
        }
    }

    /// Wins minus losses
    pub fn differential(&self) -> i64 {
        self.wins as i64 - self.losses as i64
    }

    /// Points scored minus points conceded
    pub fn point_differential(&self) -> i64 {
        let diff = i128::from(self.points_for) - i128::from(self.points_against);
        diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }
}

/// One record per team, in order of first appearance
pub fn tally(bracket: &BracketData) -> Vec<TeamRecord> {
    tally_rounds(bracket, |_| true)
}

/// Records sorted by wins minus losses, ties keeping appearance order
pub fn standings(bracket: &BracketData) -> Vec<TeamRecord> {
    let mut records = tally(bracket);
    sort_by_differential(&mut records);
    records
}

/// Stable descending sort on wins minus losses
pub(crate) fn sort_by_differential(records: &mut [TeamRecord]) {
    records.sort_by_key(|r| Reverse(r.differential()));
}

/// Tally completed matches from the rounds accepted by `include`.
///
/// Every team in the bracket gets a record, even without results. A
/// completed bye counts as a win with no opponent.
pub(crate) fn tally_rounds(
    bracket: &BracketData,
    include: impl Fn(&Round) -> bool,
) -> Vec<TeamRecord> {
    let mut records: Vec<TeamRecord> = bracket.teams().into_iter().map(TeamRecord::new).collect();
    let index: FxHashMap<TeamId, usize> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (r.team.id.clone(), i))
        .collect();

    for round in bracket.rounds() {
        if !include(round) {
            continue;
        }
        for m in bracket.round_matches(round).filter(|m| m.is_completed()) {
            if let (Some(t1), Some(t2), Some(result)) = (&m.team1, &m.team2, &m.result) {
                let s1 = result.team1_score.unwrap_or(0);
                let s2 = result.team2_score.unwrap_or(0);
                for (team, scored, conceded) in [(t1, s1, s2), (t2, s2, s1)] {
                    if let Some(&i) = index.get(&team.id) {
                        let record = &mut records[i];
                        record.played = record.played.saturating_add(1);
                        record.points_for = record.points_for.saturating_add(u64::from(scored));
                        record.points_against =
                            record.points_against.saturating_add(u64::from(conceded));
                    }
                }
            }

            let Some(winner) = m.winner() else {
                continue;
            };
            if let Some(&i) = index.get(&winner.id) {
                records[i].wins = records[i].wins.saturating_add(1);
            }
            if let Some(loser) = m.opponent_of(&winner.id) {
                if let Some(&i) = index.get(&loser.id) {
                    records[i].losses = records[i].losses.saturating_add(1);
                }
            }
        }
    }

    records
}
