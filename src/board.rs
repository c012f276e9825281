//! Go board state machine.
//!
//! This module provides the live game state and its rules:
//! - Stone placement with legality checks (bounds, occupancy, ko, suicide)
//! - Capture of dead groups and capture accounting
//! - Single-stone ko detection
//! - Undo/redo through a snapshot history
//! - A simplified area score
//!
//! The legality pre-check for suicide follows the simplified rule by default:
//! the placed stone must have a liberty on its own, before any captures are
//! resolved. [`SuicideRule::CaptureAware`] opts into the standard rule.

use std::fmt;

use crate::constants::{DEFAULT_SIZE, KOMI, MAX_SIZE, MIN_SIZE};
use crate::grid::{Color, Grid, Point, column_letter};
use crate::history::{History, Snapshot};

/// Reason a move is illegal, in order of precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// Point is off the board
    #[error("illegal move: point is off the board")]
    OutOfBounds,
    /// Point is not empty
    #[error("illegal move: point not empty")]
    Occupied,
    /// Move retakes a ko
    #[error("illegal move: retakes ko")]
    Ko,
    /// Move would leave its own group without liberties
    #[error("illegal move: suicide")]
    Suicide,
}

/// Board construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("unsupported board size {0}, expected {MIN_SIZE}..={MAX_SIZE}")]
    InvalidSize(usize),
}

/// How the legality check judges self-capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuicideRule {
    /// The placed stone's group must have a liberty before captures are
    /// resolved. Stricter than real Go: a move that would only live by
    /// capturing is rejected.
    #[default]
    Simplified,
    /// A move is legal if it captures an adjacent opponent group, even when
    /// its own group would otherwise have no liberties.
    CaptureAware,
}

/// Area score of a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub black: f32,
    pub white: f32,
}

impl Score {
    /// The player with the higher total, or `None` on a draw.
    pub fn winner(&self) -> Option<Color> {
        if self.black > self.white {
            Some(Color::Black)
        } else if self.white > self.black {
            Some(Color::White)
        } else {
            None
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(Color::Black) => write!(f, "B+{}", self.black - self.white),
            Some(Color::White) => write!(f, "W+{}", self.white - self.black),
            None => write!(f, "0"),
        }
    }
}

/// A Go position with its history.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    to_play: Color,
    last_move: Option<Point>,
    ko: Option<Point>,
    /// Stones captured by Black and White respectively
    captures: [u32; 2],
    /// Aggregate liberties of Black and White respectively
    liberties: [u32; 2],
    komi: f32,
    suicide_rule: SuicideRule,
    history: History,
    /// Off for rollout copies: no snapshots, no liberty totals
    tracked: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(DEFAULT_SIZE)
    }
}

impl Board {
    /// Create an empty board of the given size with Black to play.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self::empty(size))
    }

    fn empty(size: usize) -> Self {
        let grid = Grid::new(size);
        let history = History::new(Snapshot {
            grid: grid.clone(),
            last_move: None,
            captures: [0, 0],
            liberties: [0, 0],
        });
        Self {
            grid,
            to_play: Color::Black,
            last_move: None,
            ko: None,
            captures: [0, 0],
            liberties: [0, 0],
            komi: KOMI,
            suicide_rule: SuicideRule::default(),
            history,
            tracked: true,
        }
    }

    pub fn with_komi(mut self, komi: f32) -> Self {
        self.komi = komi;
        self
    }

    pub fn with_suicide_rule(mut self, rule: SuicideRule) -> Self {
        self.suicide_rule = rule;
        self
    }

    /// A copy for trial play. Its history holds only the current state.
    pub fn scratch(&self) -> Self {
        Self {
            grid: self.grid.clone(),
            to_play: self.to_play,
            last_move: self.last_move,
            ko: self.ko,
            captures: self.captures,
            liberties: self.liberties,
            komi: self.komi,
            suicide_rule: self.suicide_rule,
            history: History::new(self.snapshot()),
            tracked: true,
        }
    }

    /// A copy for throwaway play, such as playouts.
    ///
    /// Moves on it skip the history push and the liberty totals, so undo is
    /// unavailable and [`Board::liberties`] keeps the values of the source.
    pub fn rollout(&self) -> Self {
        Self {
            tracked: false,
            ..self.scratch()
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn get(&self, p: Point) -> Option<Color> {
        self.grid.get(p)
    }

    #[inline]
    pub fn to_play(&self) -> Color {
        self.to_play
    }

    #[inline]
    pub fn last_move(&self) -> Option<Point> {
        self.last_move
    }

    /// The point currently forbidden by the ko rule.
    #[inline]
    pub fn ko(&self) -> Option<Point> {
        self.ko
    }

    /// Stones captured by `color`.
    #[inline]
    pub fn captures(&self, color: Color) -> u32 {
        self.captures[color.index()]
    }

    /// Sum of liberties over all groups of `color`, as of the last recomputation.
    #[inline]
    pub fn liberties(&self, color: Color) -> u32 {
        self.liberties[color.index()]
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    pub fn suicide_rule(&self) -> SuicideRule {
        self.suicide_rule
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid.clone(),
            last_move: self.last_move,
            captures: self.captures,
            liberties: self.liberties,
        }
    }

    fn restore(&mut self, s: &Snapshot) {
        self.grid = s.grid.clone();
        self.last_move = s.last_move;
        self.captures = s.captures;
        self.liberties = s.liberties;
    }

    /// Check a move and report the first violated rule.
    ///
    /// Precedence: out of bounds, occupied, ko, suicide.
    pub fn check_move(&self, p: Point) -> Result<(), MoveError> {
        if !self.grid.contains(p) {
            return Err(MoveError::OutOfBounds);
        }
        if self.grid.get(p).is_some() {
            return Err(MoveError::Occupied);
        }
        if self.is_ko_move(p) {
            return Err(MoveError::Ko);
        }
        if self.is_suicide_move(p) {
            return Err(MoveError::Suicide);
        }
        Ok(())
    }

    #[inline]
    pub fn is_valid_move(&self, p: Point) -> bool {
        self.check_move(p).is_ok()
    }

    /// Whether `p` is the active ko point.
    #[inline]
    pub fn is_ko_move(&self, p: Point) -> bool {
        self.ko == Some(p)
    }

    /// Whether placing the current player's stone at the empty point `p`
    /// leaves its group without liberties.
    ///
    /// Off-board and occupied points are not suicide (they fail earlier checks).
    pub fn is_suicide_move(&self, p: Point) -> bool {
        if !self.grid.is_empty(p) {
            return false;
        }
        let mut trial = self.grid.clone();
        trial.set(p, Some(self.to_play));
        if trial.has_liberty(p) {
            return false;
        }
        match self.suicide_rule {
            SuicideRule::Simplified => true,
            SuicideRule::CaptureAware => {
                let opp = self.to_play.opponent();
                // Not suicide if some adjacent opponent group dies instead
                !trial
                    .neighbors(p)
                    .any(|n| trial.get(n) == Some(opp) && !trial.has_liberty(n))
            }
        }
    }

    /// Play the current player's stone at `p`.
    ///
    /// Returns the number of opponent stones captured, or the reason the move
    /// is illegal (the board is then unchanged).
    pub fn place_stone(&mut self, p: Point) -> Result<usize, MoveError> {
        self.check_move(p)?;

        let me = self.to_play;
        let opp = me.opponent();
        self.grid.set(p, Some(me));
        self.last_move = Some(p);
        self.ko = None;

        // Removing a group only adds liberties, but keep going until stable.
        let mut captured = Vec::new();
        loop {
            let removed = self.capture_dead_stones(opp);
            if removed.is_empty() {
                break;
            }
            captured.extend(removed);
        }
        self.captures[me.index()] += captured.len() as u32;

        if captured.len() == 1 {
            let own = self.grid.group_of(p);
            if own.len() == 1 && self.grid.liberties_of(&own) == 1 {
                self.ko = Some(captured[0]);
            }
        }

        if self.tracked {
            self.calculate_liberties();
            self.history.push(self.snapshot());
        }
        self.to_play = opp;
        Ok(captured.len())
    }

    /// Remove every group of `color` without liberties and return the removed points.
    ///
    /// Capture credit is the caller's business.
    fn capture_dead_stones(&mut self, color: Color) -> Vec<Point> {
        let mut removed = Vec::new();
        for group in self.grid.groups(color) {
            if self.grid.liberties_of(&group) == 0 {
                for &s in &group {
                    self.grid.set(s, None);
                }
                removed.extend(group);
            }
        }
        removed
    }

    /// Recompute the aggregate liberty totals, counting each group once.
    pub fn calculate_liberties(&mut self) {
        for color in [Color::Black, Color::White] {
            self.liberties[color.index()] = self
                .grid
                .groups(color)
                .iter()
                .map(|g| self.grid.liberties_of(g) as u32)
                .sum();
        }
    }

    /// Step back one snapshot. Returns false at the start of the game.
    ///
    /// The player to move toggles and any ko prohibition is dropped.
    pub fn undo_move(&mut self) -> bool {
        let Some(s) = self.history.back().cloned() else {
            return false;
        };
        self.restore(&s);
        self.after_navigation();
        true
    }

    /// Step forward one snapshot. Returns false at the end of the history.
    pub fn redo_move(&mut self) -> bool {
        let Some(s) = self.history.forward().cloned() else {
            return false;
        };
        self.restore(&s);
        self.after_navigation();
        true
    }

    fn after_navigation(&mut self) {
        self.to_play = self.to_play.opponent();
        self.ko = None;
    }

    /// Simplified area score.
    ///
    /// Stones on the board, plus empty regions bordered by a single color,
    /// plus the stones each side captured, plus komi for White.
    pub fn score(&self) -> Score {
        let mut points = [
            self.grid.count(Color::Black) as f32,
            self.grid.count(Color::White) as f32,
        ];

        for region in self.grid.empty_regions() {
            let mut touches = [false, false];
            for &p in &region {
                for n in self.grid.neighbors(p) {
                    if let Some(c) = self.grid.get(n) {
                        touches[c.index()] = true;
                    }
                }
            }
            match touches {
                [true, false] => points[0] += region.len() as f32,
                [false, true] => points[1] += region.len() as f32,
                _ => {} // Contested or neutral
            }
        }

        Score {
            black: points[0] + self.captures[0] as f32,
            white: points[1] + self.captures[1] as f32 + self.komi,
        }
    }

    /// The winner by [`Board::score`], or `None` on a draw.
    pub fn determine_winner(&self) -> Option<Color> {
        self.score().winner()
    }

    /// Legal points in row-major order.
    pub fn legal_moves(&self) -> Vec<Point> {
        self.grid
            .points()
            .filter(|&p| self.is_valid_move(p))
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        write!(f, "   ")?;
        for x in 0..size {
            write!(f, " {}", column_letter(x))?;
        }
        writeln!(f)?;
        for y in 0..size {
            write!(f, "{:>3}", size - y)?;
            for x in 0..size {
                let p = Point::new(x, y);
                let ch = match self.grid.get(p) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None if self.ko == Some(p) => '#',
                    None => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "captures: black {} white {}, {} to play",
            self.captures[0], self.captures[1], self.to_play
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: usize, y: usize) -> Point {
        Point::new(x, y)
    }

    /// Play a sequence of moves, alternating colors. Panics on illegal moves.
    fn play_all(board: &mut Board, moves: &[(usize, usize)]) {
        for &(x, y) in moves {
            if let Err(e) = board.place_stone(pt(x, y)) {
                panic!("move ({x}, {y}) failed: {e}");
            }
        }
    }

    #[test]
    fn test_new_rejects_bad_sizes() {
        assert_eq!(Board::new(3).unwrap_err(), BoardError::InvalidSize(3));
        assert_eq!(Board::new(26).unwrap_err(), BoardError::InvalidSize(26));
        assert!(Board::new(9).is_ok());
        assert_eq!(Board::default().size(), 19);
    }

    #[test]
    fn test_check_move_precedence() {
        let mut board = Board::new(9).unwrap();
        assert_eq!(board.check_move(pt(9, 0)), Err(MoveError::OutOfBounds));
        board.place_stone(pt(4, 4)).unwrap();
        assert_eq!(board.check_move(pt(4, 4)), Err(MoveError::Occupied));
        assert_eq!(board.check_move(pt(0, 0)), Ok(()));
    }

    #[test]
    fn test_suicide_corner() {
        let mut board = Board::new(9).unwrap();
        // B (1,0), W far, B (0,1): White at (0,0) has no liberties
        play_all(&mut board, &[(1, 0), (8, 8), (0, 1)]);
        assert_eq!(board.to_play(), Color::White);
        assert!(board.is_suicide_move(pt(0, 0)));
        assert_eq!(board.place_stone(pt(0, 0)), Err(MoveError::Suicide));
        assert_eq!(
            board.history().len(),
            4,
            "failed move must not touch history"
        );
    }

    #[test]
    fn test_suicide_ignores_occupied_and_off_board() {
        let mut board = Board::new(9).unwrap();
        board.place_stone(pt(2, 2)).unwrap();
        assert!(!board.is_suicide_move(pt(2, 2)));
        assert!(!board.is_suicide_move(pt(20, 2)));
    }

    #[test]
    fn test_capture_credits_mover() {
        let mut board = Board::new(9).unwrap();
        // B (1,0), W (0,0), B (0,1) captures
        play_all(&mut board, &[(1, 0), (0, 0)]);
        let captured = board.place_stone(pt(0, 1)).unwrap();
        assert_eq!(captured, 1);
        assert_eq!(board.get(pt(0, 0)), None);
        assert_eq!(board.captures(Color::Black), 1);
        assert_eq!(board.captures(Color::White), 0);
    }

    #[test]
    fn test_capture_two_groups_at_once() {
        let mut board = Board::new(9).unwrap();
        // White stones at (0,0) and (2,0), black plays (1,0) last
        play_all(
            &mut board,
            &[(0, 1), (0, 0), (2, 1), (2, 0), (3, 0), (8, 8)],
        );
        let captured = board.place_stone(pt(1, 0)).unwrap();
        assert_eq!(captured, 2);
        assert_eq!(board.captures(Color::Black), 2);
        assert!(board.ko().is_none(), "two stones captured is never ko");
    }

    #[test]
    fn test_liberty_totals() {
        let mut board = Board::new(9).unwrap();
        board.place_stone(pt(4, 4)).unwrap();
        assert_eq!(board.liberties(Color::Black), 4);
        board.place_stone(pt(0, 0)).unwrap();
        assert_eq!(board.liberties(Color::White), 2);
        board.place_stone(pt(4, 5)).unwrap();
        // Two-stone group counted once: 6 liberties
        assert_eq!(board.liberties(Color::Black), 6);
    }

    #[test]
    fn test_undo_redo_toggles_player() {
        let mut board = Board::new(9).unwrap();
        assert!(!board.undo_move());
        assert!(!board.redo_move());
        board.place_stone(pt(3, 3)).unwrap();
        assert!(board.undo_move());
        assert_eq!(board.to_play(), Color::Black);
        assert_eq!(board.get(pt(3, 3)), None);
        assert_eq!(board.last_move(), None);
        assert!(board.redo_move());
        assert_eq!(board.to_play(), Color::White);
        assert_eq!(board.get(pt(3, 3)), Some(Color::Black));
        assert_eq!(board.last_move(), Some(pt(3, 3)));
    }

    #[test]
    fn test_new_move_discards_redo() {
        let mut board = Board::new(9).unwrap();
        play_all(&mut board, &[(3, 3), (5, 5)]);
        assert!(board.undo_move());
        board.place_stone(pt(6, 6)).unwrap();
        assert!(!board.redo_move());
        assert_eq!(board.history().len(), 3);
        assert_eq!(board.get(pt(5, 5)), None);
    }

    #[test]
    fn test_score_empty_board() {
        let board = Board::new(9).unwrap();
        let score = board.score();
        assert_eq!(score.black, 0.0);
        assert_eq!(score.white, KOMI);
        assert_eq!(board.determine_winner(), Some(Color::White));
    }

    #[test]
    fn test_score_territory_and_draw() {
        let mut board = Board::new(9).unwrap().with_komi(0.0);
        // Lone black stone owns the whole board
        board.place_stone(pt(4, 4)).unwrap();
        let score = board.score();
        assert_eq!(score.black, 81.0);
        assert_eq!(score.white, 0.0);
        assert_eq!(score.to_string(), "B+81");

        // Both colors touch the single empty region: only stones count
        board.place_stone(pt(0, 0)).unwrap();
        let score = board.score();
        assert_eq!(score.black, 1.0);
        assert_eq!(score.white, 1.0);
        assert_eq!(score.winner(), None);
        assert_eq!(score.to_string(), "0");
    }

    #[test]
    fn test_scratch_has_single_snapshot() {
        let mut board = Board::new(9).unwrap();
        play_all(&mut board, &[(3, 3), (5, 5)]);
        let scratch = board.scratch();
        assert_eq!(scratch.history().len(), 1);
        assert_eq!(scratch.grid(), board.grid());
        assert_eq!(scratch.to_play(), board.to_play());
        assert_eq!(scratch.last_move(), board.last_move());
    }

    #[test]
    fn test_rollout_skips_bookkeeping() {
        let mut board = Board::new(9).unwrap();
        play_all(&mut board, &[(1, 0), (0, 0)]);
        let mut rollout = board.rollout();
        assert_eq!(rollout.place_stone(pt(0, 1)), Ok(1));
        assert_eq!(rollout.get(pt(0, 0)), None);
        assert_eq!(rollout.captures(Color::Black), 1);
        assert_eq!(rollout.to_play(), Color::White);
        assert_eq!(rollout.history().len(), 1);
        assert!(!rollout.undo_move());
        // Totals are those of the source position
        assert_eq!(
            rollout.liberties(Color::Black),
            board.liberties(Color::Black)
        );
        assert_eq!(board.get(pt(0, 0)), Some(Color::White));
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(9).unwrap();
        board.place_stone(pt(0, 0)).unwrap();
        let s = board.to_string();
        assert!(s.starts_with("    A B C D E F G H J"));
        assert!(s.contains("  9 X ."));
        assert!(s.ends_with("white to play"));
    }
}
