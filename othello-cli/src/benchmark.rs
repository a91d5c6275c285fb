//! Benchmark command - measure search cost with and without pruning
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: collect_positions(), run_benchmarks(), report_results()
//! - Level 3: benchmark_depth(), random_position()
//! - Level 4: timing utilities, formatting

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use othello_core::{Board, MinimaxAI, Player};

/// Plies of random play used to reach each sample position
const OPENING_PLIES: usize = 12;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Maximum search depth to test
    #[arg(long, default_value = "5")]
    pub depth: u32,

    /// Number of sampled positions in addition to the start position
    #[arg(long, default_value = "8")]
    pub positions: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Cost of searching every sample position at one depth
#[derive(Clone, Debug, Serialize)]
struct BenchmarkResult {
    depth: u32,
    pruning: bool,
    positions: usize,
    nodes: u64,
    #[serde(serialize_with = "serialize_millis")]
    total_time: Duration,
}

impl BenchmarkResult {
    fn nodes_per_second(&self) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if secs > 0.0 {
            self.nodes as f64 / secs
        } else {
            0.0
        }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
///
/// 1. Collect the start position plus seeded random positions
/// 2. Search each one at depths 1..=depth, pruned and unpruned
/// 3. Report nodes and time
pub fn run(args: BenchmarkArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting benchmark: depth 1..={}, {} sampled positions",
        args.depth,
        args.positions
    );

    let positions = collect_positions(args.positions, seed);
    let results = run_benchmarks(&positions, args.depth, seed);

    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Start position plus `count` positions reached by random play
fn collect_positions(count: usize, seed: Option<u64>) -> Vec<(Board, Player)> {
    let mut rng = create_rng(seed);
    let mut positions = vec![(Board::new(), Player::Black)];
    positions.extend((0..count).filter_map(|_| random_position(&mut rng, OPENING_PLIES)));
    positions
}

fn run_benchmarks(positions: &[(Board, Player)], max_depth: u32, seed: Option<u64>) -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    for depth in 1..=max_depth.max(1) {
        for pruning in [true, false] {
            tracing::info!("Benchmarking depth {} (pruning {})...", depth, pruning);
            results.push(benchmark_depth(positions, depth, pruning, seed.unwrap_or(0)));
        }
    }
    results
}

fn report_results(results: &[BenchmarkResult], json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(results).context("Failed to serialize benchmark results")?;
        println!("{}", out);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn benchmark_depth(positions: &[(Board, Player)], depth: u32, pruning: bool, seed: u64) -> BenchmarkResult {
    let mut ai = MinimaxAI::with_seed(depth, seed).with_pruning(pruning);
    let mut nodes = 0;

    let start = Instant::now();
    for (board, player) in positions {
        ai.best_move(board, *player);
        nodes += ai.nodes_evaluated();
    }

    BenchmarkResult {
        depth,
        pruning,
        positions: positions.len(),
        nodes,
        total_time: start.elapsed(),
    }
}

/// Play `plies` random legal moves from the start; None if the game ends first
fn random_position(rng: &mut ChaCha8Rng, plies: usize) -> Option<(Board, Player)> {
    let mut board = Board::new();
    let mut player = Player::Black;

    for _ in 0..plies {
        if board.is_terminal() {
            return None;
        }
        if let Some(&mv) = board.valid_moves(player).choose(rng) {
            board.apply(mv, player);
        }
        player = player.opponent();
    }

    (!board.is_terminal()).then_some((board, player))
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

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1000.0)
}

/// Format duration for display
fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else if d.as_millis() >= 1 {
        format!("{:.1}ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{:.1}us", d.as_secs_f64() * 1_000_000.0)
    }
}

fn print_text_results(results: &[BenchmarkResult]) {
    println!("\n=== Search Benchmark ===");
    println!(
        "{:<6} {:<8} {:>10} {:>12} {:>14}",
        "Depth", "Pruning", "Positions", "Nodes", "Time"
    );
    for r in results {
        println!(
            "{:<6} {:<8} {:>10} {:>12} {:>14}",
            r.depth,
            if r.pruning { "on" } else { "off" },
            r.positions,
            r.nodes,
            format_duration(r.total_time)
        );
    }
    if let Some(best) = results
        .iter()
        .max_by(|a, b| a.nodes_per_second().total_cmp(&b.nodes_per_second()))
    {
        println!("\nPeak throughput: {:.0} nodes/s", best.nodes_per_second());
    }
}
