//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use othello_core::{GameSession, Outcome, Player, Score, Turn};
use serde::{Deserialize, Serialize};

use crate::config::{AiConfig, DEFAULT_BASE_SEED};

/// Outcome of a single game
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Final result
    pub outcome: Outcome,
    /// Final disc counts
    pub score: Score,
    /// Move history, passes included
    pub turns: Vec<Turn>,
    /// Total nodes searched by each side
    pub black_nodes: u64,
    pub white_nodes: u64,
}

impl GameOutcome {
    pub fn black_wins(&self) -> bool {
        self.outcome == Outcome::Winner(Player::Black)
    }

    pub fn white_wins(&self) -> bool {
        self.outcome == Outcome::Winner(Player::White)
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == Outcome::Draw
    }

    /// Get winner (None for draw)
    pub fn winner(&self) -> Option<Player> {
        self.outcome.winner()
    }

    /// Disc margin from `player`'s point of view
    pub fn margin(&self, player: Player) -> i32 {
        self.score.of(player) as i32 - self.score.of(player.opponent()) as i32
    }

    pub fn passes(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| matches!(t, Turn::Pass { .. }))
            .count()
    }
}

/// Plays AI-vs-AI games between two configurations
pub struct GameRunner {
    black: AiConfig,
    white: AiConfig,
    /// Random seed counter
    seed_counter: u64,
}

impl GameRunner {
    pub fn new(black: AiConfig, white: AiConfig) -> Self {
        Self {
            black,
            white,
            seed_counter: DEFAULT_BASE_SEED,
        }
    }

    /// Play a complete game from the standard start position
    pub fn play_game(&mut self) -> GameOutcome {
        self.play_from(GameSession::new())
    }

    /// Play a session to the end
    pub fn play_from(&mut self, mut session: GameSession) -> GameOutcome {
        let black_seed = self.next_seed();
        let white_seed = self.next_seed();
        let mut black_ai = self.black.build(black_seed);
        let mut white_ai = self.white.build(white_seed);
        let mut black_nodes = 0;
        let mut white_nodes = 0;

        while !session.is_over() {
            let (ai, nodes) = match session.to_move() {
                Player::Black => (&mut black_ai, &mut black_nodes),
                Player::White => (&mut white_ai, &mut white_nodes),
            };
            // Only fails once the game is over, which the loop condition rules out
            if session.play_ai(ai).is_err() {
                break;
            }
            *nodes += ai.nodes_evaluated();
        }

        let outcome = session.board().winner();
        let score = session.score();
        tracing::debug!(
            "game finished: {} ({}-{}) after {} turns",
            outcome,
            score.black,
            score.white,
            session.history().len()
        );

        GameOutcome {
            outcome,
            score,
            turns: session.history().to_vec(),
            black_nodes,
            white_nodes,
        }
    }

    /// Get next seed and increment counter
    fn next_seed(&mut self) -> u64 {
        let seed = self.seed_counter;
        self.seed_counter = self.seed_counter.wrapping_add(1);
        seed
    }

    /// Reset seed counter
    pub fn reset_seed(&mut self, seed: u64) {
        self.seed_counter = seed;
    }

    pub fn black_config(&self) -> &AiConfig {
        &self.black
    }

    pub fn white_config(&self) -> &AiConfig {
        &self.white
    }
}
