//! Configuration for bracket generation
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};

/// How the seeded order is written into first-round slots
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedPlacement {
    /// Top team in slot 0, the rest in every second slot from 1, wrapping to 2
    #[default]
    Sequential,
    /// Classic 1 vs N, 2 vs N-1 placement with top seeds kept apart
    Standard,
}

/// Generation options
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BracketConfig {
    /// Sort teams by seed before placement
    pub seeded: bool,
    /// Slot placement policy for elimination brackets
    pub placement: SeedPlacement,
    /// Shuffle the input order with this RNG seed before seeding (None = keep order)
    pub shuffle_seed: Option<u64>,
    /// Complete first-round byes and advance their lone team
    pub resolve_byes: bool,
}

impl BracketConfig {
    /// Config with the seed sort switched on or off
    pub fn seeded(seeded: bool) -> Self {
        Self {
            seeded,
            ..Default::default()
        }
    }

    /// Set the placement policy
    pub fn with_placement(mut self, placement: SeedPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the draw seed
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Resolve first-round byes after generation
    pub fn with_resolve_byes(mut self, resolve: bool) -> Self {
        self.resolve_byes = resolve;
        self
    }
}
