//! Goban-MCTS: A Go engine with a time-bounded Monte Carlo search.
//!
//! ## Usage
//!
//! - `goban-mcts` - Start the GTP server
//! - `goban-mcts gtp` - Start the GTP server for GUI integration
//! - `goban-mcts demo --moves 30` - Play the engine against itself
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use flexi_logger::Logger;

use goban_mcts::board::{Board, SuicideRule};
use goban_mcts::config::SearchConfig;
use goban_mcts::constants::{
    DEFAULT_SIZE, EXPLORATION, KOMI, MAX_NODES, N_SIMS, SEARCH_RADIUS, TIME_BUDGET_MS,
};
use goban_mcts::engine::Engine;
use goban_mcts::gtp::GtpEngine;

/// Goban-MCTS: A Go engine with a time-bounded MCTS
#[derive(Parser)]
#[command(name = "goban-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Board size (7 to 25)
    #[arg(long, global = true, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Maximum search iterations per move
    #[arg(long, global = true, default_value_t = N_SIMS)]
    iterations: usize,

    /// UCT exploration weight
    #[arg(long, global = true, default_value_t = EXPLORATION)]
    exploration: f64,

    /// Wall-clock budget per move in milliseconds
    #[arg(long, global = true, default_value_t = TIME_BUDGET_MS)]
    time_ms: u64,

    /// Candidate radius around the last move
    #[arg(long, global = true, default_value_t = SEARCH_RADIUS)]
    radius: usize,

    /// Maximum number of search tree nodes
    #[arg(long, global = true, default_value_t = MAX_NODES)]
    max_nodes: usize,

    /// Komi added to White's score
    #[arg(long, global = true, default_value_t = KOMI)]
    komi: f32,

    /// Seed for a reproducible engine
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// How the legality check treats self-capture
    #[arg(long, global = true, value_enum, default_value_t = SuicideArg::Simplified)]
    suicide_rule: SuicideArg,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Let the engine play against itself and print the result
    Demo {
        /// Number of moves to play
        #[arg(long, default_value_t = 30)]
        moves: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SuicideArg {
    Simplified,
    CaptureAware,
}

impl From<SuicideArg> for SuicideRule {
    fn from(arg: SuicideArg) -> Self {
        match arg {
            SuicideArg::Simplified => SuicideRule::Simplified,
            SuicideArg::CaptureAware => SuicideRule::CaptureAware,
        }
    }
}

fn main() -> anyhow::Result<()> {
    Logger::try_with_env_or_str("info")?
        .format(flexi_logger::colored_default_format)
        .start()?;

    let cli = Cli::parse();

    let config = SearchConfig::default()
        .with_iterations(cli.iterations)
        .with_exploration(cli.exploration)
        .with_time_budget(Duration::from_millis(cli.time_ms))
        .with_radius(cli.radius)
        .with_max_nodes(cli.max_nodes);
    config.validate().context("invalid search options")?;

    let board = Board::new(cli.size)
        .context("invalid board options")?
        .with_komi(cli.komi)
        .with_suicide_rule(cli.suicide_rule.into());

    let engine = match cli.seed {
        Some(seed) => Engine::with_seed(config, seed),
        None => Engine::new(config),
    };

    match cli.command {
        Some(Commands::Demo { moves }) => run_demo(board, engine, moves),
        Some(Commands::Gtp) | None => GtpEngine::new(board, engine).run(),
    }
}

fn run_demo(mut board: Board, mut engine: Engine, moves: usize) -> anyhow::Result<()> {
    println!("Goban-MCTS self-play on {0}x{0}\n", board.size());

    for n in 1..=moves {
        let player = board.to_play();
        let Some(mv) = engine.find_best_move(&board) else {
            println!("{player} has no move, stopping");
            break;
        };
        board
            .place_stone(mv)
            .with_context(|| format!("engine chose an illegal move {mv}"))?;
        println!("{n:>3}. {player} {}", mv.to_gtp(board.size()));
    }

    let score = board.score();
    println!("\n{board}\n");
    println!(
        "Score: black {:.1}, white {:.1} ({score})",
        score.black, score.white
    );
    Ok(())
}
