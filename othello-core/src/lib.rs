//! Othello Core - Game engine and AI
//!
//! This crate provides the core game logic for Othello:
//! - Board geometry (8x8 grid with row/column coordinates)
//! - Board state, flip-capture move generation and scoring
//! - Phase-aware position evaluation
//! - Minimax AI with alpha-beta pruning
//! - Game sessions that own the authoritative board

pub mod board;
pub mod error;
pub mod game;
pub mod eval;
pub mod ai;
pub mod session;

// Re-exports for convenient access
pub use board::{Square, BOARD_SIZE, CORNERS, DANGER_SQUARES, DIRECTIONS};
pub use error::{BoardParseError, MoveError};
pub use game::{Board, Cell, Move, Outcome, Player, Score};
pub use eval::{evaluate, EvalTerms, Phase, PhaseWeights};
pub use ai::{best_move, MinimaxAI, SearchResult, DEFAULT_DEPTH};
pub use session::{GameSession, Turn};
