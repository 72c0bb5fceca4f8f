//! Bracket Core - Tournament bracket generation and progression
//!
//! This crate provides the bracket engine:
//! - Seeding and first-round slot placement
//! - Generators for single elimination, double elimination, round robin and Swiss
//! - Result reporting that advances winners into successor matches
//! - Records and standings tallied from completed matches
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: generate, update_match_result (orchestration)
//! - Level 2: format generators (phases)
//! - Level 3: seeding, pairing, tallying (steps)
//! - Level 4: data model, configuration

pub mod advance;
pub mod bracket;
pub mod config;
pub mod error;
pub mod formats;
pub mod generate;
pub mod records;
pub mod seeding;
pub mod session;
pub mod team;

// Re-exports for convenient access
pub use advance::{resolve_byes, try_update_match_result, update_match_result, validate_result};
pub use bracket::{
    BracketData, BracketSnapshot, BracketType, Match, MatchId, MatchResult, MatchState, Round,
    RoundData, RoundId, Slot, SubBracket,
};
pub use config::{BracketConfig, SeedPlacement};
pub use error::{EngineError, EngineResult};
pub use formats::swiss::repair_round;
pub use formats::{generator_for, FormatGenerator};
pub use generate::{generate, generate_tagged, generate_with};
pub use records::{standings, tally, TeamRecord};
pub use session::{BracketSession, CompletionListener};
pub use team::{Seed, Team, TeamId};
