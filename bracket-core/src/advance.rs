//! Advancement - apply a reported result and move the winner one hop
//!
//! Each call returns a new snapshot. Only the reported match and its
//! successor are copied; every other record stays shared with the input.
//!
//! Per match: Empty -> Partial -> Ready -> Completed, and completion writes
//! the winner into the successor's slot. Nothing cascades further.

use std::sync::Arc;

use crate::bracket::{BracketData, MatchId, MatchResult, Slot};
use crate::error::{EngineError, EngineResult};
use crate::team::Team;

// ============================================================================
// Level 1 - Operations
// ============================================================================

/// Mark a match completed with `result` merged over any earlier result and
/// seat the winner in the successor match.
///
/// Unknown match ids are ignored: the returned snapshot equals the input.
/// Scores and winners are taken as given; see [`validate_result`].
pub fn update_match_result(
    bracket: &BracketData,
    match_id: &str,
    result: MatchResult,
) -> BracketData {
    let mut next = bracket.clone();

    let Some(target) = next.match_mut(match_id) else {
        tracing::warn!(match_id, "ignoring result for unknown match");
        return next;
    };

    let winner: Option<Arc<Team>> = result
        .winner
        .as_ref()
        .and_then(|id| target.team_by_id(id).cloned());
    target.result = Some(result.merged_over(target.result.as_ref()));
    let link = target.next_match_id.clone().zip(target.next_match_slot);

    if let (Some(team), Some((next_id, slot))) = (winner, link) {
        seat(&mut next, &next_id, slot, team);
    }

    next.bump_version();
    tracing::debug!(match_id, version = next.version(), "match completed");
    next
}

/// Validate, then apply. Nothing changes when validation fails.
pub fn try_update_match_result(
    bracket: &BracketData,
    match_id: &str,
    result: MatchResult,
) -> EngineResult<BracketData> {
    validate_result(bracket, match_id, &result)?;
    Ok(update_match_result(bracket, match_id, result))
}

/// Consistency checks that `update_match_result` leaves to the caller.
///
/// Rejects unknown matches, byes, any report before both teams are seated, a winner who is not playing, scores that favour the other side,
/// and a different winner for an already completed match.
pub fn validate_result(
    bracket: &BracketData,
    match_id: &str,
    result: &MatchResult,
) -> EngineResult<()> {
    let m = bracket
        .match_by_id(match_id)
        .ok_or_else(|| EngineError::UnknownMatch(MatchId::new(match_id)))?;

    if m.bye {
        return Err(EngineError::ByeMatch(m.id.clone()));
    }

    let (Some(team1), Some(team2)) = (&m.team1, &m.team2) else {
        return Err(EngineError::MatchNotReady(m.id.clone()));
    };

    // Scores alone are fine once both teams are seated
    let Some(winner) = &result.winner else {
        return Ok(());
    };

    if &team1.id != winner && &team2.id != winner {
        return Err(EngineError::WinnerNotInMatch {
            match_id: m.id.clone(),
            winner: winner.clone(),
        });
    }

    if let Some(existing) = m.result.as_ref().filter(|r| r.completed) {
        if let Some(previous) = existing.winner.as_ref().filter(|w| *w != winner) {
            return Err(EngineError::ResultConflict {
                match_id: m.id.clone(),
                existing: previous.clone(),
            });
        }
    }

    if let (Some(s1), Some(s2)) = (result.team1_score, result.team2_score) {
        let winner_is_team1 = &team1.id == winner;
        let contradicts = if winner_is_team1 { s1 < s2 } else { s2 < s1 };
        if contradicts {
            return Err(EngineError::ScoreMismatch {
                match_id: m.id.clone(),
                winner: winner.clone(),
                team1_score: s1,
                team2_score: s2,
            });
        }
    }

    Ok(())
}

/// Complete every unresolved bye that holds exactly one team and seat that
/// team in the successor. One hop per bye; a successor that is left with a
/// single team is not resolved in turn.
pub fn resolve_byes(bracket: &BracketData) -> BracketData {
    let pending: Vec<(MatchId, Arc<Team>)> = bracket
        .matches()
        .filter(|m| m.bye && !m.is_completed())
        .filter_map(|m| match (&m.team1, &m.team2) {
            (Some(team), None) | (None, Some(team)) => Some((m.id.clone(), team.clone())),
            _ => None,
        })
        .collect();

    tracing::debug!(byes = pending.len(), "resolving byes");

    pending.into_iter().fold(bracket.clone(), |current, (id, team)| {
        update_match_result(&current, id.as_str(), MatchResult::won_by(team.id.clone()))
    })
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Write `team` into `slot` of match `next_id`, if that match exists
fn seat(bracket: &mut BracketData, next_id: &MatchId, slot: Slot, team: Arc<Team>) {
    match bracket.match_mut(next_id.as_str()) {
        Some(successor) => successor.set_slot(slot, Some(team)),
        None => tracing::warn!(%next_id, "successor match missing from bracket"),
    }
}
