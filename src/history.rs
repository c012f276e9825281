//! Undo/redo history of board snapshots.
//!
//! The history is an ordered list of immutable snapshots with a cursor
//! pointing at the snapshot that matches the live board. Pushing a new
//! snapshot after an undo discards everything after the cursor.

use crate::grid::{Grid, Point};

/// Board contents saved after every successful placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Grid,
    pub last_move: Option<Point>,
    /// Stones captured by Black and White respectively.
    pub captures: [u32; 2],
    /// Aggregate liberties of Black and White respectively.
    pub liberties: [u32; 2],
}

#[derive(Clone, Debug)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: usize,
}

impl History {
    /// Start a history holding one initial snapshot.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    /// Append a snapshot after the cursor, truncating any redo branch.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step the cursor back and return the snapshot there.
    pub fn back(&mut self) -> Option<&Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step the cursor forward and return the snapshot there.
    pub fn forward(&mut self) -> Option<&Snapshot> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.cursor]
    }

    /// Number of stored snapshots, including any redo branch.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(n: u32) -> Snapshot {
        Snapshot {
            grid: Grid::new(9),
            last_move: None,
            captures: [n, 0],
            liberties: [0, 0],
        }
    }

    #[test]
    fn test_back_and_forward() {
        let mut h = History::new(snap(0));
        h.push(snap(1));
        h.push(snap(2));
        assert_eq!(h.len(), 3);
        assert_eq!(h.back().map(|s| s.captures[0]), Some(1));
        assert_eq!(h.back().map(|s| s.captures[0]), Some(0));
        assert!(h.back().is_none());
        assert_eq!(h.cursor(), 0);
        assert_eq!(h.forward().map(|s| s.captures[0]), Some(1));
        assert_eq!(h.forward().map(|s| s.captures[0]), Some(2));
        assert!(h.forward().is_none());
    }

    #[test]
    fn test_push_truncates_redo_branch() {
        let mut h = History::new(snap(0));
        h.push(snap(1));
        h.push(snap(2));
        h.back();
        h.back();
        assert!(h.can_redo());
        h.push(snap(7));
        assert_eq!(h.len(), 2);
        assert!(!h.can_redo());
        assert_eq!(h.current().captures[0], 7);
    }
}
