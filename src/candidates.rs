//! Candidate move generation heuristics.
//!
//! Rather than considering every legal point, the search looks at:
//! - Legal points close to the last move
//! - Star points and the center (openings and sparse positions)
//! - A capped row-major scan when nothing else is available
//!
//! Expansion then picks which new child to simulate first using one of
//! three [`Preference`]s, drawn at random for diversity.

use crate::board::Board;
use crate::constants::{CONNECTIVITY_BONUS, MAX_CANDIDATES, MIN_CANDIDATES};
use crate::grid::{Color, Point};

/// The eight star points on the 4th lines, corners first, then sides.
pub fn star_points(size: usize) -> [Point; 8] {
    let far = size - 4;
    let mid = size / 2;
    [
        Point::new(3, 3),
        Point::new(3, far),
        Point::new(far, 3),
        Point::new(far, far),
        Point::new(3, mid),
        Point::new(mid, 3),
        Point::new(far, mid),
        Point::new(mid, far),
    ]
}

/// Center point (tengen).
pub fn center(size: usize) -> Point {
    Point::new(size / 2, size / 2)
}

/// Legal points in the square of the given radius around `focus`.
///
/// Scans column by column, each column top to bottom.
pub fn moves_in_range(board: &Board, focus: Point, radius: usize) -> Vec<Point> {
    let size = board.size();
    let x0 = focus.x.saturating_sub(radius);
    let y0 = focus.y.saturating_sub(radius);
    let x1 = (focus.x + radius).min(size.saturating_sub(1));
    let y1 = (focus.y + radius).min(size.saturating_sub(1));

    let mut moves = Vec::new();
    for x in x0..=x1 {
        for y in y0..=y1 {
            let p = Point::new(x, y);
            if board.is_valid_move(p) {
                moves.push(p);
            }
        }
    }
    moves
}

/// Legal center and star points, center first. Used for the first move.
pub fn opening_moves(board: &Board) -> Vec<Point> {
    let mut moves = Vec::new();
    for p in std::iter::once(center(board.size())).chain(star_points(board.size())) {
        if board.is_valid_move(p) && !moves.contains(&p) {
            moves.push(p);
        }
    }
    moves
}

/// Candidate moves for expanding a node whose position is `board`.
///
/// Tries the neighborhood of the last move first, then star points and the
/// center, then a full scan that stops at [`MAX_CANDIDATES`].
pub fn expansion_candidates(board: &Board, radius: usize) -> Vec<Point> {
    let mut moves = match board.last_move() {
        Some(last) => moves_in_range(board, last, radius),
        None => Vec::new(),
    };

    if moves.len() < MIN_CANDIDATES {
        for p in star_points(board.size())
            .into_iter()
            .chain(std::iter::once(center(board.size())))
        {
            if board.is_valid_move(p) && !moves.contains(&p) {
                moves.push(p);
            }
        }
    }

    if moves.len() < MIN_CANDIDATES {
        for p in board.grid().points() {
            if moves.len() >= MAX_CANDIDATES {
                break;
            }
            if !moves.contains(&p) && board.is_valid_move(p) {
                moves.push(p);
            }
        }
    }

    moves
}

/// Strategy for choosing which freshly expanded child to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// Uniformly random
    Random,
    /// Farthest from the last move
    Distant,
    /// Closest to the center, with a bonus for touching friendly stones
    Central,
}

impl Preference {
    pub const ALL: [Preference; 3] = [
        Preference::Random,
        Preference::Distant,
        Preference::Central,
    ];

    /// Draw one preference uniformly.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(..Self::ALL.len())]
    }

    /// Index into `candidates` of the preferred move for `player`.
    ///
    /// `candidates` must not be empty. Without a last move, `Distant` falls
    /// back to `Central`.
    pub fn pick(
        self,
        board: &Board,
        candidates: &[Point],
        player: Color,
        rng: &mut fastrand::Rng,
    ) -> usize {
        match (self, board.last_move()) {
            (Preference::Random, _) => rng.usize(..candidates.len()),
            (Preference::Distant, Some(last)) => most_distant(candidates, last),
            _ => most_central(board, candidates, player),
        }
    }
}

fn most_distant(candidates: &[Point], from: Point) -> usize {
    let mut best = 0;
    let mut best_dist = 0;
    for (i, &p) in candidates.iter().enumerate() {
        let d = p.distance2(from);
        if d > best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

fn most_central(board: &Board, candidates: &[Point], player: Color) -> usize {
    let size = board.size();
    let mid = center(size);
    let mut best = 0;
    let mut best_dist = (size * size * 2) as i64;
    for (i, &p) in candidates.iter().enumerate() {
        let friends = board
            .grid()
            .neighbors(p)
            .filter(|&n| board.get(n) == Some(player))
            .count() as i64;
        let d = p.distance2(mid) - friends * CONNECTIVITY_BONUS;
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}
