//! Monte Carlo playouts (bounded random game simulation).
//!
//! A playout plays a few dozen random moves near the previous move and
//! scores the result by capture counts alone. This is much cheaper than
//! playing to the end and scoring territory.

use crate::board::Board;
use crate::candidates::moves_in_range;
use crate::constants::{
    PLAYOUT_MAX_PLIES, PLAYOUT_MIN_PLIES, RANDOM_PLAY_ATTEMPTS, STALL_PERIOD, STALL_START,
};
use crate::grid::{Color, Point};

/// Play a random continuation on `board` and score it for `owner`.
///
/// Returns 1.0 if `owner` ends with strictly more captured stones than its
/// opponent, 0.0 otherwise.
pub fn mcplayout(board: &mut Board, owner: Color, radius: usize, rng: &mut fastrand::Rng) -> f64 {
    let max_plies = rng.usize(PLAYOUT_MIN_PLIES..PLAYOUT_MAX_PLIES);
    let mut checkpoint = capture_counts(board);
    let mut plies = 0;

    while plies < max_plies {
        let Some(pt) = choose_random_move(board, radius, rng) else {
            break;
        };
        if board.place_stone(pt).is_err() {
            break;
        }
        plies += 1;

        // Stop early once captures have stalled for a whole period
        if plies > STALL_START && plies % STALL_PERIOD == 0 {
            let now = capture_counts(board);
            if now == checkpoint {
                break;
            }
            checkpoint = now;
        }
    }

    let mine = board.captures(owner);
    let theirs = board.captures(owner.opponent());
    if mine > theirs { 1.0 } else { 0.0 }
}

fn capture_counts(board: &Board) -> (u32, u32) {
    (board.captures(Color::Black), board.captures(Color::White))
}

/// Choose a random legal move near the last move, falling back to a few
/// random points anywhere on the board.
fn choose_random_move(board: &Board, radius: usize, rng: &mut fastrand::Rng) -> Option<Point> {
    if let Some(last) = board.last_move() {
        let moves = moves_in_range(board, last, radius);
        if !moves.is_empty() {
            return Some(moves[rng.usize(..moves.len())]);
        }
    }

    let size = board.size();
    (0..RANDOM_PLAY_ATTEMPTS)
        .map(|_| Point::new(rng.usize(..size), rng.usize(..size)))
        .find(|&p| board.is_valid_move(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mcplayout_terminates_with_bounded_length() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..20 {
            let mut board = Board::new(9).unwrap();
            board.place_stone(Point::new(4, 4)).unwrap();
            let start = board.history().len();
            let v = mcplayout(&mut board, Color::Black, 1, &mut rng);
            assert!(v == 0.0 || v == 1.0);
            let played = board.history().len() - start;
            assert!(played < PLAYOUT_MAX_PLIES, "played {played} plies");
        }
    }

    /// Plies played by one playout from `board`, and whether anything was captured.
    fn run_playout(board: &Board, rng: &mut fastrand::Rng) -> (usize, bool) {
        let mut b = board.scratch();
        mcplayout(&mut b, Color::Black, 1, rng);
        let captured = capture_counts(&b) != capture_counts(board);
        (b.history().len() - 1, captured)
    }

    #[test]
    fn test_mcplayout_stops_when_captures_stall() {
        // First stall check after STALL_START
        let first_check = (STALL_START / STALL_PERIOD + 1) * STALL_PERIOD;
        assert_eq!(first_check, 25);

        let mut sparse = Board::new(19).unwrap();
        sparse.place_stone(Point::new(3, 3)).unwrap();
        sparse.place_stone(Point::new(15, 15)).unwrap();
        let mut dense = Board::new(9).unwrap();
        dense.place_stone(Point::new(4, 4)).unwrap();

        let mut rng = fastrand::Rng::with_seed(77);
        let (mut stalled, mut busy) = (0, 0);
        for board in [&sparse, &dense] {
            for _ in 0..150 {
                let (plies, captured) = run_playout(board, &mut rng);
                if captured {
                    // Captures before the first check keep the playout going
                    assert!(plies > first_check, "stopped at {plies}");
                    busy += 1;
                } else {
                    assert_eq!(plies, first_check);
                    stalled += 1;
                }
            }
        }
        assert!(stalled > 0 && busy > 0, "stalled {stalled}, busy {busy}");
    }

    #[test]
    fn test_mcplayout_scores_by_captures() {
        // Black already captured a stone; a board with nothing left to play
        // cannot change that.
        let mut board = Board::new(7).unwrap();
        board.place_stone(Point::new(1, 0)).unwrap();
        board.place_stone(Point::new(0, 0)).unwrap();
        board.place_stone(Point::new(0, 1)).unwrap();
        assert_eq!(board.captures(Color::Black), 1);

        let mut rng = fastrand::Rng::with_seed(7);
        let mut b = board.scratch();
        let v_black = mcplayout(&mut b, Color::Black, 1, &mut rng);
        let mut w = board.scratch();
        let v_white = mcplayout(&mut w, Color::White, 1, &mut rng);
        // Both outcomes are consistent with the final capture counts
        assert_eq!(
            v_black == 1.0,
            b.captures(Color::Black) > b.captures(Color::White)
        );
        assert_eq!(
            v_white == 1.0,
            w.captures(Color::White) > w.captures(Color::Black)
        );
    }

    #[test]
    fn test_choose_random_move_is_legal() {
        let mut rng = fastrand::Rng::with_seed(5);
        let mut board = Board::new(9).unwrap();
        board.place_stone(Point::new(0, 0)).unwrap();
        for _ in 0..50 {
            if let Some(p) = choose_random_move(&board, 1, &mut rng) {
                assert!(board.is_valid_move(p));
            }
        }
    }

    #[test]
    fn test_choose_random_move_without_last_move() {
        let mut rng = fastrand::Rng::with_seed(11);
        let board = Board::new(9).unwrap();
        // Every point is legal on an empty board, so the first attempt succeeds
        let p = choose_random_move(&board, 1, &mut rng);
        assert!(p.is_some_and(|p| board.is_valid_move(p)));
    }
}
