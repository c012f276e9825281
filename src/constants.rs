//! Constants for board geometry, search parameters and heuristics.
//!
//! This module contains the default values for every tunable of the engine.
//! The board size is chosen at runtime and validated against
//! [`MIN_SIZE`]..=[`MAX_SIZE`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
pub const DEFAULT_SIZE: usize = 19;

/// Smallest supported board. Star points sit on the 4th line, so anything
/// smaller would put them off the board.
pub const MIN_SIZE: usize = 7;

/// Largest supported board (25 GTP column letters, `I` is skipped).
pub const MAX_SIZE: usize = 25;

/// Compensation points awarded to White.
pub const KOMI: f32 = 4.0;

// =============================================================================
// Search Budget
// =============================================================================

/// Default maximum number of search iterations per move.
pub const N_SIMS: usize = 789;

/// Default UCT exploration weight.
pub const EXPLORATION: f64 = 4.2;

/// Default wall-clock budget per move, in milliseconds.
pub const TIME_BUDGET_MS: u64 = 3000;

/// Default radius around the last move used for candidate generation.
pub const SEARCH_RADIUS: usize = 1;

/// Default cap on the number of nodes in one search tree.
pub const MAX_NODES: usize = 1_000_000;

// =============================================================================
// Selection
// =============================================================================

/// Probability of descending into a random child instead of the best one.
pub const PROB_RANDOM_DESCENT: f64 = 0.05;

/// A node must have more visits than this before random descent is allowed.
pub const RANDOM_DESCENT_VISITS: u32 = 50;

// =============================================================================
// Expansion
// =============================================================================

/// Below this many candidates, expansion widens to star points and then to
/// a full board scan.
pub const MIN_CANDIDATES: usize = 5;

/// The full board scan stops once this many candidates are held.
pub const MAX_CANDIDATES: usize = 20;

/// Distance credit per same-colored orthogonal neighbor in the central
/// preference.
pub const CONNECTIVITY_BONUS: i64 = 5;

// =============================================================================
// Playouts
// =============================================================================

/// Fewest plies in a playout.
pub const PLAYOUT_MIN_PLIES: usize = 40;

/// Playout length is drawn from `PLAYOUT_MIN_PLIES..PLAYOUT_MAX_PLIES`.
pub const PLAYOUT_MAX_PLIES: usize = 60;

/// Stall detection starts after this many plies.
pub const STALL_START: usize = 20;

/// Stall detection compares capture counts every this many plies.
pub const STALL_PERIOD: usize = 5;

/// Random board points tried when nothing is legal near the last move.
pub const RANDOM_PLAY_ATTEMPTS: usize = 10;
