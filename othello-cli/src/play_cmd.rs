//! Play command - a single AI-vs-AI game printed move by move
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_engines(), play_game(), report_result()
//! - Level 3: describe_turn()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use othello_core::{GameSession, MinimaxAI, Outcome, Player, Turn};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Search depth for Black
    #[arg(long, default_value = "4")]
    pub black_depth: u32,

    /// Search depth for White
    #[arg(long, default_value = "4")]
    pub white_depth: u32,

    /// Disable alpha-beta cutoffs (same moves, more nodes)
    #[arg(long)]
    pub no_prune: bool,

    /// Only print the final result
    #[arg(long)]
    pub quiet: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting game: Black depth {} vs White depth {}",
        args.black_depth,
        args.white_depth
    );

    let (mut black, mut white) = build_engines(&args, seed);
    let session = play_game(&mut black, &mut white, args.quiet)?;

    report_result(&session);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Build one engine per side; a global seed makes the whole game repeatable
fn build_engines(args: &PlayArgs, seed: Option<u64>) -> (MinimaxAI, MinimaxAI) {
    let mut rng = create_rng(seed);
    let prune = !args.no_prune;
    let black = MinimaxAI::with_seed(args.black_depth, rng.gen()).with_pruning(prune);
    let white = MinimaxAI::with_seed(args.white_depth, rng.gen()).with_pruning(prune);
    (black, white)
}

/// Play until neither side can move
fn play_game(black: &mut MinimaxAI, white: &mut MinimaxAI, quiet: bool) -> Result<GameSession> {
    let mut session = GameSession::new();

    if !quiet {
        println!("{}", session.board().pretty(session.to_move()));
    }

    while !session.is_over() {
        let ai = match session.to_move() {
            Player::Black => &mut *black,
            Player::White => &mut *white,
        };
        let turn = session.play_ai(ai)?;

        if !quiet {
            println!("{}  [{} nodes]", describe_turn(&turn), ai.nodes_evaluated());
            println!("{}", session.board().pretty(session.to_move()));
        }
    }

    Ok(session)
}

/// Print the final score and winner
fn report_result(session: &GameSession) {
    let score = session.score();
    println!("\n=== Game Over ===");
    println!("Black: {}  White: {}", score.black, score.white);
    match session.outcome() {
        Some(Outcome::Winner(player)) => println!("{} wins", player),
        Some(Outcome::Draw) => println!("Draw"),
        None => println!("Unfinished"),
    }
    println!("Turns: {}", session.history().len());
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn describe_turn(turn: &Turn) -> String {
    match turn {
        Turn::Play {
            player,
            square,
            flipped,
        } => format!("{} plays {} flipping {}", player, square, flipped),
        Turn::Pass { player } => format!("{} passes", player),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_core::Square;

    fn args(black_depth: u32, white_depth: u32) -> PlayArgs {
        PlayArgs {
            black_depth,
            white_depth,
            no_prune: false,
            quiet: true,
        }
    }

    #[test]
    fn test_describe_turn() {
        let play = Turn::Play {
            player: Player::Black,
            square: Square::new(2, 3),
            flipped: 1,
        };
        assert_eq!(describe_turn(&play), "Black plays (2, 3) flipping 1");
        assert_eq!(
            describe_turn(&Turn::Pass { player: Player::White }),
            "White passes"
        );
    }

    #[test]
    fn test_build_engines_respects_flags() {
        let mut flags = args(2, 3);
        flags.no_prune = true;
        let (black, white) = build_engines(&flags, Some(1));
        assert_eq!(black.depth, 2);
        assert_eq!(white.depth, 3);
        assert!(!black.pruning);
        assert!(!white.pruning);
    }

    #[test]
    fn test_seeded_game_repeats() {
        let play = || {
            let (mut black, mut white) = build_engines(&args(2, 1), Some(5));
            play_game(&mut black, &mut white, true).map(|s| s.history().to_vec())
        };
        let first = play().unwrap();
        let second = play().unwrap();
        assert_eq!(first, second);
    }
}
