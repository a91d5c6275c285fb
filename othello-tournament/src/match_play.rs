//! Match play - multiple games between two AI configurations
//!
//! Level 2 - Phase-level implementation

use othello_core::Player;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{AiConfig, MatchConfig};
use crate::game_runner::{GameOutcome, GameRunner};

/// Result of a match (multiple games), from the point of view of the two
/// configurations rather than the two colours
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchResult {
    /// Wins for the first configuration
    pub a_wins: u32,
    /// Wins for the second configuration
    pub b_wins: u32,
    pub draws: u32,
    /// Average disc margin for the first configuration
    pub avg_margin: f32,
    /// Total games played
    pub games_played: u32,
    /// Individual game outcomes, in game order
    pub game_outcomes: Vec<MatchGame>,
}

/// One game of a match
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchGame {
    /// Colour the first configuration played
    pub a_color: Player,
    pub outcome: GameOutcome,
}

impl MatchGame {
    pub fn a_margin(&self) -> i32 {
        self.outcome.margin(self.a_color)
    }
}

impl MatchResult {
    /// Create empty result
    pub fn empty() -> Self {
        Self {
            a_wins: 0,
            b_wins: 0,
            draws: 0,
            avg_margin: 0.0,
            games_played: 0,
            game_outcomes: Vec::new(),
        }
    }

    pub fn a_win_rate(&self) -> f32 {
        self.rate(self.a_wins)
    }

    pub fn b_win_rate(&self) -> f32 {
        self.rate(self.b_wins)
    }

    pub fn draw_rate(&self) -> f32 {
        self.rate(self.draws)
    }

    /// Wins = 1.0, Draws = 0.5, Losses = 0.0
    pub fn score_for_a(&self) -> f32 {
        self.a_wins as f32 + 0.5 * self.draws as f32
    }

    pub fn score_for_b(&self) -> f32 {
        self.b_wins as f32 + 0.5 * self.draws as f32
    }

    fn rate(&self, count: u32) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            count as f32 / self.games_played as f32
        }
    }
}

/// Play a match between two AI configurations (Level 2 phase)
///
/// Colours alternate: configuration `a` plays Black in even-numbered games.
pub fn play_match(a: &AiConfig, b: &AiConfig, config: &MatchConfig) -> MatchResult {
    if config.games == 0 {
        return MatchResult::empty();
    }

    let games: Vec<MatchGame> = if config.parallel {
        (0..config.games)
            .into_par_iter()
            .map(|i| play_single_game(a, b, i, config.base_seed))
            .collect()
    } else {
        (0..config.games)
            .map(|i| play_single_game(a, b, i, config.base_seed))
            .collect()
    };

    let result = aggregate_results(games);
    tracing::info!(
        "match finished: a={} b={} draws={} (avg margin {:.1})",
        result.a_wins,
        result.b_wins,
        result.draws,
        result.avg_margin
    );
    result
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

fn play_single_game(a: &AiConfig, b: &AiConfig, game_index: usize, base_seed: u64) -> MatchGame {
    let a_is_black = game_index % 2 == 0;
    let mut runner = if a_is_black {
        GameRunner::new(a.clone(), b.clone())
    } else {
        GameRunner::new(b.clone(), a.clone())
    };
    // Two engines per game, so step seeds by two
    runner.reset_seed(base_seed.wrapping_add(2 * game_index as u64));

    let outcome = runner.play_game();
    tracing::debug!("game {}: {}", game_index + 1, outcome.outcome);

    MatchGame {
        a_color: if a_is_black { Player::Black } else { Player::White },
        outcome,
    }
}

/// Aggregate game outcomes into a match result
fn aggregate_results(games: Vec<MatchGame>) -> MatchResult {
    let mut result = MatchResult::empty();
    let mut total_margin = 0i64;

    for game in &games {
        match game.outcome.winner() {
            Some(winner) if winner == game.a_color => result.a_wins += 1,
            Some(_) => result.b_wins += 1,
            None => result.draws += 1,
        }
        total_margin += game.a_margin() as i64;
    }

    result.games_played = games.len() as u32;
    if !games.is_empty() {
        result.avg_margin = total_margin as f32 / games.len() as f32;
    }
    result.game_outcomes = games;
    result
}
