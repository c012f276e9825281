//! Goban-MCTS: A Go board engine with a time-bounded Monte Carlo search.
//!
//! This crate provides the rules of Go on a square board of runtime size,
//! and a Monte Carlo Tree Search (MCTS) that picks moves within an
//! iteration and wall-clock budget.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits and search parameters
//! - [`grid`] - Colors, coordinates, and the raw intersection grid
//! - [`history`] - Snapshot history for undo/redo
//! - [`board`] - Game rules (legality, captures, ko, scoring)
//! - [`candidates`] - Candidate move heuristics and expansion preferences
//! - [`playout`] - Bounded random game simulation
//! - [`config`] - Search configuration
//! - [`tree`] - Arena-backed search tree
//! - [`mcts`] - Selection, expansion, simulation, and backpropagation
//! - [`engine`] - Move selection entry point
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use goban_mcts::board::Board;
//! use goban_mcts::config::SearchConfig;
//! use goban_mcts::engine::Engine;
//! use goban_mcts::grid::Point;
//!
//! // Create a new game and play a move
//! let mut board = Board::new(9).unwrap();
//! board.place_stone(Point::new(4, 4)).unwrap();
//!
//! // Run a short search for the reply
//! let mut engine = Engine::new(SearchConfig::default().with_iterations(100));
//! if let Some(reply) = engine.find_best_move(&board) {
//!     println!("Best move: {}", reply.to_gtp(board.size()));
//! }
//! ```

pub mod board;
pub mod candidates;
pub mod config;
pub mod constants;
pub mod engine;
pub mod grid;
pub mod gtp;
pub mod history;
pub mod mcts;
pub mod playout;
pub mod tree;
