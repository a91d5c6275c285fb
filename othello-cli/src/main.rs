//! Othello CLI - Command-line interface
//!
//! Commands:
//! - play: Play a single AI-vs-AI game
//! - match: Play a series of games between two search depths
//! - bench: Time the search with and without pruning

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod benchmark;
mod match_cmd;
mod play_cmd;

#[derive(Parser)]
#[command(name = "othello")]
#[command(about = "Othello engine with minimax search")]
struct Cli {
    /// Random seed for reproducible move ordering
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single AI-vs-AI game
    Play(play_cmd::PlayArgs),
    /// Play a match between two search depths
    Match(match_cmd::MatchArgs),
    /// Benchmark the search
    Bench(benchmark::BenchmarkArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Bench(args) => benchmark::run(args, cli.seed),
    }
}
