//! Othello Tournament - AI-vs-AI self-play
//!
//! This crate provides match infrastructure:
//! - Single games between two engine configurations
//! - Matches with alternating colours, optionally in parallel
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 2: play_match (phases)
//! - Level 3: GameRunner::play_game (steps)
//! - Level 4: configuration

mod config;
mod game_runner;
mod match_play;

pub use config::{AiConfig, MatchConfig, DEFAULT_BASE_SEED};
pub use game_runner::{GameOutcome, GameRunner};
pub use match_play::{play_match, MatchGame, MatchResult};
