//! Engine error types.

use thiserror::Error;

use crate::bracket::{BracketType, MatchId};
use crate::team::TeamId;

/// Errors surfaced by the bracket engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Format tag does not name a known bracket type
    #[error("unsupported bracket type: {0}")]
    UnsupportedBracketType(String),

    /// No match with this id exists in the bracket
    #[error("match not found: {0}")]
    UnknownMatch(MatchId),

    /// No round with this index exists in the bracket
    #[error("round {0} not found")]
    UnknownRound(usize),

    /// Two matches share an id in a loaded snapshot
    #[error("duplicate match id: {0}")]
    DuplicateMatchId(MatchId),

    /// Byes are not user-completable
    #[error("match {0} is a bye and cannot be reported")]
    ByeMatch(MatchId),

    /// A winner was declared before both slots were filled
    #[error("match {0} is missing a team")]
    MatchNotReady(MatchId),

    /// Declared winner is not one of the two teams
    #[error("team {winner} is not playing in match {match_id}")]
    WinnerNotInMatch { match_id: MatchId, winner: TeamId },

    /// Scores point the other way from the declared winner
    #[error("score {team1_score}-{team2_score} contradicts winner {winner} in match {match_id}")]
    ScoreMismatch {
        match_id: MatchId,
        winner: TeamId,
        team1_score: u32,
        team2_score: u32,
    },

    /// Match was already completed with a different winner
    #[error("match {match_id} already completed with winner {existing}")]
    ResultConflict { match_id: MatchId, existing: TeamId },

    /// Operation only applies to one bracket format
    #[error("operation requires a {expected} bracket, found {found}")]
    WrongFormat {
        expected: BracketType,
        found: BracketType,
    },

    /// Round already has completed matches and cannot be re-paired
    #[error("round {0} already has completed matches")]
    RoundStarted(usize),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
