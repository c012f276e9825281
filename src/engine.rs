//! Move selection entry point.
//!
//! Opening moves come straight from the star points. Otherwise a fresh
//! search tree is built for the position, searched, and discarded; the most
//! visited root child is the answer. If the search produced nothing, a
//! random backup candidate is used.

use crate::board::Board;
use crate::candidates::{moves_in_range, opening_moves};
use crate::config::SearchConfig;
use crate::grid::Point;
use crate::mcts::{SearchStats, dump_children, run_mcts};
use crate::tree::SearchTree;

/// Result of one move selection.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Chosen move, or `None` when no legal move was found
    pub best: Option<Point>,
    /// Statistics of the search, if one ran
    pub stats: Option<SearchStats>,
}

/// Choose a move for the player to move on `board`.
///
/// The returned point is legal on `board` at call time. The board itself is
/// never modified.
pub fn search(board: &Board, config: &SearchConfig, rng: &mut fastrand::Rng) -> SearchOutcome {
    let size = board.size();

    let backup = match board.last_move() {
        Some(last) => moves_in_range(board, last, config.radius),
        None => {
            let opening = opening_moves(board);
            if !opening.is_empty() {
                let best = opening[rng.usize(..opening.len())];
                log::info!("opening move {}", best.to_gtp(size));
                return SearchOutcome {
                    best: Some(best),
                    stats: None,
                };
            }
            let legal = board.legal_moves();
            if legal.is_empty() {
                log::info!("no legal move for {}", board.to_play());
                return SearchOutcome::default();
            }
            legal
        }
    };

    let mut tree = SearchTree::new(board.to_play(), config.max_nodes);
    let stats = run_mcts(&mut tree, board, config, rng);
    dump_children(&tree, size);

    let best = match tree.best_child().and_then(|c| c.mv) {
        Some(mv) => Some(mv),
        None if !backup.is_empty() => Some(backup[rng.usize(..backup.len())]),
        None => None,
    };

    match best {
        Some(mv) => log::info!(
            "best move {} after {} iterations",
            mv.to_gtp(size),
            stats.iterations
        ),
        None => log::info!("no legal move for {}", board.to_play()),
    }

    SearchOutcome {
        best,
        stats: Some(stats),
    }
}

/// Convenience wrapper around [`search`] returning only the move.
pub fn find_best_move(
    board: &Board,
    config: &SearchConfig,
    rng: &mut fastrand::Rng,
) -> Option<Point> {
    search(board, config, rng).best
}

/// A search configuration bundled with its random generator.
pub struct Engine {
    config: SearchConfig,
    rng: fastrand::Rng,
}

impl Engine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            rng: fastrand::Rng::new(),
        }
    }

    /// Create an engine with a reproducible random sequence.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self {
            config,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn find_best_move(&mut self, board: &Board) -> Option<Point> {
        find_best_move(board, &self.config, &mut self.rng)
    }

    pub fn search(&mut self, board: &Board) -> SearchOutcome {
        search(board, &self.config, &mut self.rng)
    }
}
