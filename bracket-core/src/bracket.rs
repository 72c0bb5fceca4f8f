//! Bracket data model - teams in slots, matches in rounds, rounds in a snapshot
//!
//! A `BracketData` is an immutable snapshot. Matches live in an id-addressed
//! store of `Arc<Match>` and rounds keep ordered id lists, so producing the
//! next snapshot only copies the records that actually change.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::EngineError;
use crate::team::{Team, TeamId};

// ============================================================================
// Identifiers and tags
// ============================================================================

/// Tournament format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BracketType {
    /// Knockout, one loss eliminates
    #[serde(rename = "single")]
    SingleElimination,
    /// Winners bracket, losers bracket and grand finals
    #[serde(rename = "double")]
    DoubleElimination,
    /// Everyone plays everyone
    #[serde(rename = "roundrobin")]
    RoundRobin,
    /// Pair by running record
    #[serde(rename = "swiss")]
    Swiss,
}

impl BracketType {
    pub const ALL: [BracketType; 4] = [
        BracketType::SingleElimination,
        BracketType::DoubleElimination,
        BracketType::RoundRobin,
        BracketType::Swiss,
    ];

    /// Wire tag ("single", "double", "roundrobin", "swiss")
    pub fn tag(&self) -> &'static str {
        match self {
            BracketType::SingleElimination => "single",
            BracketType::DoubleElimination => "double",
            BracketType::RoundRobin => "roundrobin",
            BracketType::Swiss => "swiss",
        }
    }

    /// Whether a loss knocks a team out
    pub fn is_elimination(&self) -> bool {
        matches!(
            self,
            BracketType::SingleElimination | BracketType::DoubleElimination
        )
    }
}

impl fmt::Display for BracketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for BracketType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BracketType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| EngineError::UnsupportedBracketType(s.to_string()))
    }
}

/// Match identifier, unique within a bracket
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        MatchId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MatchId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MatchId {
    fn from(s: &str) -> Self {
        MatchId(s.to_string())
    }
}

/// Round identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(pub String);

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the two team positions in a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    #[serde(rename = "team1")]
    Team1,
    #[serde(rename = "team2")]
    Team2,
}

impl Slot {
    /// `Team1` for even predecessor indices, `Team2` for odd
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Slot::Team1
        } else {
            Slot::Team2
        }
    }
}

// ============================================================================
// Matches
// ============================================================================

/// Reported outcome of a match
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team1_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team2_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<TeamId>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub completed: bool,
}

impl MatchResult {
    /// Result declaring a winner
    pub fn won_by(winner: impl Into<TeamId>) -> Self {
        Self {
            winner: Some(winner.into()),
            ..Default::default()
        }
    }

    /// Attach scores
    pub fn with_scores(mut self, team1_score: u32, team2_score: u32) -> Self {
        self.team1_score = Some(team1_score);
        self.team2_score = Some(team2_score);
        self
    }

    /// Shallow merge of `self` over `base`, with `completed` forced on
    pub fn merged_over(self, base: Option<&MatchResult>) -> MatchResult {
        let base = base.cloned().unwrap_or_default();
        MatchResult {
            team1_score: self.team1_score.or(base.team1_score),
            team2_score: self.team2_score.or(base.team2_score),
            winner: self.winner.or(base.winner),
            completed: true,
        }
    }
}

/// Progress of a single match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchState {
    /// No team assigned yet
    Empty,
    /// One slot filled
    Partial,
    /// Both slots filled, awaiting a result
    Ready,
    /// Result reported
    Completed,
}

/// A single pairing inside a round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub round_id: RoundId,
    pub round_index: usize,
    pub match_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team1: Option<Arc<Team>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team2: Option<Arc<Team>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_match_id: Option<MatchId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_match_slot: Option<Slot>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bye: bool,
}

impl Match {
    /// Empty match with no successor
    pub fn new(id: MatchId, round_id: RoundId, round_index: usize, match_index: usize) -> Self {
        Self {
            id,
            round_id,
            round_index,
            match_index,
            team1: None,
            team2: None,
            result: None,
            next_match_id: None,
            next_match_slot: None,
            bye: false,
        }
    }

    /// Fill both slots; a missing side marks the match as a bye
    pub fn with_teams(mut self, team1: Option<Arc<Team>>, team2: Option<Arc<Team>>) -> Self {
        self.bye = team1.is_none() || team2.is_none();
        self.team1 = team1;
        self.team2 = team2;
        self
    }

    /// Link the winner of this match into `slot` of `next`
    pub fn feeding(mut self, next: MatchId, slot: Slot) -> Self {
        self.next_match_id = Some(next);
        self.next_match_slot = Some(slot);
        self
    }

    pub fn slot(&self, slot: Slot) -> Option<&Arc<Team>> {
        match slot {
            Slot::Team1 => self.team1.as_ref(),
            Slot::Team2 => self.team2.as_ref(),
        }
    }

    pub fn set_slot(&mut self, slot: Slot, team: Option<Arc<Team>>) {
        match slot {
            Slot::Team1 => self.team1 = team,
            Slot::Team2 => self.team2 = team,
        }
    }

    /// Teams currently seated, team1 first
    pub fn teams(&self) -> impl Iterator<Item = &Arc<Team>> {
        self.team1.iter().chain(self.team2.iter())
    }

    /// Seated team with the given id
    pub fn team_by_id(&self, id: &TeamId) -> Option<&Arc<Team>> {
        self.teams().find(|t| &t.id == id)
    }

    /// The seated team other than `id`
    pub fn opponent_of(&self, id: &TeamId) -> Option<&Arc<Team>> {
        self.teams().find(|t| &t.id != id)
    }

    pub fn is_completed(&self) -> bool {
        self.result.as_ref().is_some_and(|r| r.completed)
    }

    /// Winning team, if the result names one of the seated teams
    pub fn winner(&self) -> Option<&Arc<Team>> {
        let winner = self.result.as_ref()?.winner.as_ref()?;
        self.team_by_id(winner)
    }

    pub fn state(&self) -> MatchState {
        if self.is_completed() {
            return MatchState::Completed;
        }
        match (self.team1.is_some(), self.team2.is_some()) {
            (true, true) => MatchState::Ready,
            (false, false) => MatchState::Empty,
            _ => MatchState::Partial,
        }
    }
}

// ============================================================================
// Rounds
// ============================================================================

/// Which part of the bracket a round belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubBracket {
    /// Winners bracket, or the only bracket for other formats
    Main,
    /// Consolation rounds of double elimination
    Losers,
    /// Deciding round of double elimination
    GrandFinals,
}

/// A round in the store: metadata plus ordered match ids
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub id: RoundId,
    pub round_index: usize,
    pub name: String,
    pub match_ids: Vec<MatchId>,
    pub is_consolation: bool,
    pub is_finals: bool,
}

impl Round {
    pub fn sub_bracket(&self) -> SubBracket {
        if self.is_finals {
            SubBracket::GrandFinals
        } else if self.is_consolation {
            SubBracket::Losers
        } else {
            SubBracket::Main
        }
    }
}

/// A round with its matches inlined. Generators produce these and the
/// serialized form of a bracket is a list of them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundData {
    pub id: RoundId,
    pub round_index: usize,
    pub name: String,
    pub matches: Vec<Match>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_consolation: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_finals: bool,
}

impl RoundData {
    pub fn new(id: impl Into<String>, round_index: usize, name: impl Into<String>) -> Self {
        Self {
            id: RoundId(id.into()),
            round_index,
            name: name.into(),
            matches: Vec::new(),
            is_consolation: false,
            is_finals: false,
        }
    }

    pub fn consolation(mut self) -> Self {
        self.is_consolation = true;
        self
    }

    pub fn finals(mut self) -> Self {
        self.is_finals = true;
        self
    }

    /// Empty match positioned after the ones already in this round
    pub fn new_match(&self, id: impl Into<String>) -> Match {
        Match::new(
            MatchId(id.into()),
            self.id.clone(),
            self.round_index,
            self.matches.len(),
        )
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Immutable bracket snapshot
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "BracketSnapshot", into = "BracketSnapshot")]
pub struct BracketData {
    bracket_type: BracketType,
    total_teams: usize,
    rounds: Arc<[Round]>,
    matches: FxHashMap<MatchId, Arc<Match>>,
    version: u64,
}

impl BracketData {
    /// Build the indexed store, rejecting duplicate match ids
    pub fn assemble(
        bracket_type: BracketType,
        total_teams: usize,
        rounds: Vec<RoundData>,
    ) -> Result<Self, EngineError> {
        let mut seen = FxHashSet::default();
        for m in rounds.iter().flat_map(|r| r.matches.iter()) {
            if !seen.insert(&m.id) {
                return Err(EngineError::DuplicateMatchId(m.id.clone()));
            }
        }
        Ok(Self::from_rounds(bracket_type, total_teams, rounds))
    }

    /// Build the indexed store from rounds whose match ids are known unique
    pub(crate) fn from_rounds(
        bracket_type: BracketType,
        total_teams: usize,
        rounds: Vec<RoundData>,
    ) -> Self {
        let mut matches = FxHashMap::default();
        let mut stored = Vec::with_capacity(rounds.len());

        for round in rounds {
            let mut match_ids = Vec::with_capacity(round.matches.len());
            for m in round.matches {
                match_ids.push(m.id.clone());
                matches.insert(m.id.clone(), Arc::new(m));
            }
            stored.push(Round {
                id: round.id,
                round_index: round.round_index,
                name: round.name,
                match_ids,
                is_consolation: round.is_consolation,
                is_finals: round.is_finals,
            });
        }

        Self {
            bracket_type,
            total_teams,
            rounds: stored.into(),
            matches,
            version: 0,
        }
    }

    pub fn bracket_type(&self) -> BracketType {
        self.bracket_type
    }

    pub fn total_teams(&self) -> usize {
        self.total_teams
    }

    /// Number of advancements applied since generation
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Rounds in play order
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Rounds of one sub-bracket, in play order
    pub fn rounds_in(&self, sub: SubBracket) -> impl Iterator<Item = &Round> {
        self.rounds.iter().filter(move |r| r.sub_bracket() == sub)
    }

    /// Round of a sub-bracket by its index
    pub fn round_at(&self, sub: SubBracket, round_index: usize) -> Option<&Round> {
        self.rounds_in(sub).find(|r| r.round_index == round_index)
    }

    pub fn match_by_id(&self, id: &str) -> Option<&Match> {
        self.matches.get(id).map(Arc::as_ref)
    }

    pub fn contains_match(&self, id: &str) -> bool {
        self.matches.contains_key(id)
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Matches of a round, in order
    pub fn round_matches<'a>(&'a self, round: &'a Round) -> impl Iterator<Item = &'a Match> + 'a {
        round
            .match_ids
            .iter()
            .filter_map(move |id| self.match_by_id(id.as_str()))
    }

    /// Every match in play order
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flat_map(move |r| self.round_matches(r))
    }

    /// Distinct teams in order of first appearance
    pub fn teams(&self) -> Vec<Arc<Team>> {
        let mut seen = FxHashSet::default();
        self.matches()
            .flat_map(|m| m.teams())
            .filter(|t| seen.insert(t.id.clone()))
            .cloned()
            .collect()
    }

    /// Winner of the deciding match of an elimination bracket
    pub fn champion(&self) -> Option<&Arc<Team>> {
        let deciding = match self.bracket_type {
            BracketType::SingleElimination => self.rounds.last()?,
            BracketType::DoubleElimination => self.rounds.iter().find(|r| r.is_finals)?,
            BracketType::RoundRobin | BracketType::Swiss => return None,
        };
        let m = self.round_matches(deciding).next()?;
        if m.is_completed() {
            m.winner()
        } else {
            None
        }
    }

    /// Whether every non-bye match has a completed result
    pub fn is_finished(&self) -> bool {
        self.matches().all(|m| m.bye || m.is_completed())
    }

    /// Copy-on-write access to one match record
    pub(crate) fn match_mut(&mut self, id: &str) -> Option<&mut Match> {
        self.matches.get_mut(id).map(Arc::make_mut)
    }

    /// Replace a round's matches wholesale, keeping the round metadata
    pub(crate) fn replace_round(&mut self, position: usize, matches: Vec<Match>) {
        let mut rounds = self.rounds.to_vec();
        if let Some(round) = rounds.get_mut(position) {
            for id in &round.match_ids {
                self.matches.remove(id.as_str());
            }
            round.match_ids = matches.iter().map(|m| m.id.clone()).collect();
            for m in matches {
                self.matches.insert(m.id.clone(), Arc::new(m));
            }
        }
        self.rounds = rounds.into();
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }

    /// Rounds with matches inlined, as rendered and serialized
    pub fn to_round_data(&self) -> Vec<RoundData> {
        self.rounds
            .iter()
            .map(|r| RoundData {
                id: r.id.clone(),
                round_index: r.round_index,
                name: r.name.clone(),
                matches: self.round_matches(r).cloned().collect(),
                is_consolation: r.is_consolation,
                is_finals: r.is_finals,
            })
            .collect()
    }
}

/// Content equality; the version counter is ignored
impl PartialEq for BracketData {
    fn eq(&self, other: &Self) -> bool {
        self.bracket_type == other.bracket_type
            && self.total_teams == other.total_teams
            && self.rounds == other.rounds
            && self.matches == other.matches
    }
}

impl Eq for BracketData {}

/// Serialized shape of a bracket
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketSnapshot {
    pub rounds: Vec<RoundData>,
    #[serde(rename = "type")]
    pub bracket_type: BracketType,
    pub total_teams: usize,
}

impl From<BracketData> for BracketSnapshot {
    fn from(bracket: BracketData) -> Self {
        Self {
            rounds: bracket.to_round_data(),
            bracket_type: bracket.bracket_type,
            total_teams: bracket.total_teams,
        }
    }
}

impl TryFrom<BracketSnapshot> for BracketData {
    type Error = EngineError;

    fn try_from(snapshot: BracketSnapshot) -> Result<Self, Self::Error> {
        BracketData::assemble(snapshot.bracket_type, snapshot.total_teams, snapshot.rounds)
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}
