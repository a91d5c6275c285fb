//! Configuration types for self-play
//!
//! Level 4 - Utilities and configuration

use othello_core::{MinimaxAI, DEFAULT_DEPTH};
use serde::{Deserialize, Serialize};

/// Base seed used when a match does not specify one
pub const DEFAULT_BASE_SEED: u64 = 42;

/// AI configuration for one side of a game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Search depth in plies
    pub depth: u32,
    /// Alpha-beta cutoffs on/off (affects speed only)
    pub pruning: bool,
    /// Fixed move-ordering seed (None = supplied by the runner)
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            pruning: true,
            seed: None,
        }
    }
}

impl AiConfig {
    /// Create config for minimax at given depth
    pub fn minimax(depth: u32) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Turn alpha-beta cutoffs off
    pub fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }

    /// Build an engine; `fallback_seed` is used when no seed is configured
    pub fn build(&self, fallback_seed: u64) -> MinimaxAI {
        let seed = self.seed.unwrap_or(fallback_seed);
        MinimaxAI::with_seed(self.depth, seed).with_pruning(self.pruning)
    }
}

/// Match configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of games (colours alternate, so even counts are fairest)
    pub games: usize,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// Seed from which per-game seeds are derived
    pub base_seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 10,
            parallel: true,
            base_seed: DEFAULT_BASE_SEED,
        }
    }
}

impl MatchConfig {
    pub fn new(games: usize) -> Self {
        Self {
            games,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, base_seed: u64) -> Self {
        self.base_seed = base_seed;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
