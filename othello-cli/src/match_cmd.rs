//! Match command - play games between two search depths
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_configs(), play_match(), report_results()
//! - Level 3: summarize()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use othello_core::Player;
use othello_tournament::{play_match, AiConfig, MatchConfig, MatchResult, DEFAULT_BASE_SEED};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Search depth of the first engine
    #[arg(long, default_value = "3")]
    pub depth_a: u32,

    /// Search depth of the second engine
    #[arg(long, default_value = "2")]
    pub depth_b: u32,

    /// Number of games to play (will alternate colors)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Play games one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Serializable match summary
#[derive(Debug, Serialize)]
struct MatchSummary {
    depth_a: u32,
    depth_b: u32,
    total_games: u32,
    a_wins: u32,
    b_wins: u32,
    draws: u32,
    a_win_rate: f32,
    avg_margin: f32,
    games: Vec<GameSummary>,
}

#[derive(Debug, Serialize)]
struct GameSummary {
    game_number: usize,
    a_color: Player,
    result: String,
    black: u32,
    white: u32,
    turns: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Build both engine configurations
/// 2. Play the match
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let (a, b, config) = build_configs(&args, seed);

    tracing::info!(
        "Starting match: depth {} vs depth {} ({} games)",
        args.depth_a,
        args.depth_b,
        args.games
    );

    let result = play_match(&a, &b, &config);
    let summary = summarize(&args, &result);

    report_results(&summary, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_configs(args: &MatchArgs, seed: Option<u64>) -> (AiConfig, AiConfig, MatchConfig) {
    let a = AiConfig::minimax(args.depth_a);
    let b = AiConfig::minimax(args.depth_b);
    let mut config = MatchConfig::new(args.games).with_seed(seed.unwrap_or(DEFAULT_BASE_SEED));
    if args.sequential {
        config = config.sequential();
    }
    (a, b, config)
}

fn report_results(summary: &MatchSummary, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(summary).context("Failed to serialize match results")?;
        println!("{}", out);
    } else {
        print_text_results(summary);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn summarize(args: &MatchArgs, result: &MatchResult) -> MatchSummary {
    let games = result
        .game_outcomes
        .iter()
        .enumerate()
        .map(|(i, game)| GameSummary {
            game_number: i + 1,
            a_color: game.a_color,
            result: game.outcome.outcome.to_string(),
            black: game.outcome.score.black,
            white: game.outcome.score.white,
            turns: game.outcome.turns.len(),
        })
        .collect();

    MatchSummary {
        depth_a: args.depth_a,
        depth_b: args.depth_b,
        total_games: result.games_played,
        a_wins: result.a_wins,
        b_wins: result.b_wins,
        draws: result.draws,
        a_win_rate: result.a_win_rate(),
        avg_margin: result.avg_margin,
        games,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_text_results(summary: &MatchSummary) {
    println!("\n=== Match Results ===");
    for game in &summary.games {
        println!(
            "Game {:>3}: A as {:<5}  {:>2}-{:<2}  {}",
            game.game_number, game.a_color, game.black, game.white, game.result
        );
    }
    println!();
    println!("Total games: {}", summary.total_games);
    println!(
        "A (depth {}) wins: {} ({})",
        summary.depth_a,
        summary.a_wins,
        format_percent(summary.a_win_rate)
    );
    println!("B (depth {}) wins: {}", summary.depth_b, summary.b_wins);
    println!("Draws: {}", summary.draws);
    println!("Average margin for A: {:+.1}", summary.avg_margin);
}

fn format_percent(rate: f32) -> String {
    format!("{:.1}%", rate * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(games: usize) -> MatchArgs {
        MatchArgs {
            depth_a: 2,
            depth_b: 1,
            games,
            sequential: true,
            json: false,
        }
    }

    #[test]
    fn test_build_configs_uses_seed() {
        let (a, b, config) = build_configs(&args(4), Some(9));
        assert_eq!(a.depth, 2);
        assert_eq!(b.depth, 1);
        assert_eq!(config.games, 4);
        assert_eq!(config.base_seed, 9);
        assert!(!config.parallel);

        let (_, _, default) = build_configs(&args(4), None);
        assert_eq!(default.base_seed, DEFAULT_BASE_SEED);
    }

    #[test]
    fn test_summary_matches_result() {
        let flags = args(2);
        let (a, b, config) = build_configs(&flags, Some(3));
        let result = play_match(&a, &b, &config);
        let summary = summarize(&flags, &result);

        assert_eq!(summary.total_games, 2);
        assert_eq!(summary.games.len(), 2);
        assert_eq!(summary.a_wins + summary.b_wins + summary.draws, 2);
        assert_eq!(summary.games[0].a_color, Player::Black);
        assert_eq!(summary.games[1].a_color, Player::White);
        for game in &summary.games {
            assert!(game.black + game.white <= 64);
        }

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_games"], 2);
        assert_eq!(json["games"][0]["a_color"], "Black");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.5), "50.0%");
        assert_eq!(format_percent(0.0), "0.0%");
    }
}
