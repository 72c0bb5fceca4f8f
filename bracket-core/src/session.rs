//! Bracket session - successive snapshots with undo and completion events
//!
//! The session is a single writer: reports are applied one at a time against
//! the current snapshot, so no update is lost.

use crate::advance::{try_update_match_result, update_match_result};
use crate::bracket::{BracketData, Match, MatchResult};
use crate::error::EngineResult;

/// Called with the completed match and its merged result
pub type CompletionListener = Box<dyn FnMut(&Match, &MatchResult) + Send>;

/// Owner of a bracket's snapshot history
pub struct BracketSession {
    history: Vec<BracketData>,
    listeners: Vec<CompletionListener>,
}

impl BracketSession {
    pub fn new(bracket: BracketData) -> Self {
        Self {
            history: vec![bracket],
            listeners: Vec::new(),
        }
    }

    /// Current snapshot
    pub fn current(&self) -> &BracketData {
        // history is never empty: undo keeps the first snapshot
        &self.history[self.history.len() - 1]
    }

    /// Number of snapshots, including the generated one
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Register a listener for completed matches
    pub fn on_match_completed<F>(&mut self, listener: F)
    where
        F: FnMut(&Match, &MatchResult) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Apply a result. Unknown match ids leave the session untouched and
    /// notify nobody. Returns whether a snapshot was added.
    pub fn report(&mut self, match_id: &str, result: MatchResult) -> bool {
        if !self.current().contains_match(match_id) {
            tracing::warn!(match_id, "report for unknown match ignored");
            return false;
        }
        let next = update_match_result(self.current(), match_id, result);
        self.push(next, match_id);
        true
    }

    /// Validate, then apply
    pub fn report_strict(&mut self, match_id: &str, result: MatchResult) -> EngineResult<()> {
        let next = try_update_match_result(self.current(), match_id, result)?;
        self.push(next, match_id);
        Ok(())
    }

    /// Drop the latest snapshot. The generated bracket is never removed.
    pub fn undo(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }

    /// Every snapshot, oldest first
    pub fn history(&self) -> &[BracketData] {
        &self.history
    }

    fn push(&mut self, next: BracketData, match_id: &str) {
        self.history.push(next);
        let current = &self.history[self.history.len() - 1];
        if let Some(m) = current.match_by_id(match_id) {
            if let Some(result) = &m.result {
                for listener in &mut self.listeners {
                    listener(m, result);
                }
            }
        }
    }
}
