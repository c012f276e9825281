//! Grid geometry and group analysis.
//!
//! This module provides the stateless building blocks used by every other
//! part of the engine:
//! - Stone colors and board points
//! - Orthogonal adjacency on an `NxN` grid
//! - Connected-group discovery and liberty counting
//! - GTP coordinate parsing and formatting
//!
//! Points are `(x, y)` pairs with `y = 0` on the top row. In GTP notation the
//! top row is row `N` and column letters skip `I`.

use std::fmt;

/// Stone color. An empty cell is `None` in an `Option<Color>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Index into per-color arrays (Black = 0, White = 1).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    /// Parse a GTP color argument ("b", "black", "w", "white").
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// A point on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    #[inline]
    pub fn distance2(self, other: Point) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }

    /// Parse a GTP vertex (e.g. "D4") for a board of the given size.
    ///
    /// Returns `None` for malformed input or vertices outside the board.
    /// "pass" is not a point and also yields `None`.
    pub fn parse(s: &str, size: usize) -> Option<Point> {
        let bytes = s.trim().as_bytes();
        if bytes.len() < 2 {
            return None;
        }

        let col_char = bytes[0].to_ascii_uppercase();
        if !col_char.is_ascii_uppercase() || col_char == b'I' {
            return None;
        }
        let mut col = (col_char - b'A') as usize;
        // Skip 'I' column (Go convention to avoid confusion with 'J')
        if col_char > b'I' {
            col -= 1;
        }

        let row: usize = std::str::from_utf8(&bytes[1..]).ok()?.parse().ok()?;
        if col >= size || row == 0 || row > size {
            return None;
        }
        Some(Point::new(col, size - row))
    }

    /// Format as a GTP vertex for a board of the given size.
    pub fn to_gtp(self, size: usize) -> String {
        format!("{}{}", column_letter(self.x), size - self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// GTP column letter for a column index, skipping 'I'.
pub fn column_letter(x: usize) -> char {
    let c = b'A' + x as u8;
    if c >= b'I' {
        (c + 1) as char
    } else {
        c as char
    }
}

/// A square grid of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Grid {
    /// Create an empty grid. Size validation is the board's job.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn idx(&self, p: Point) -> usize {
        p.y * self.size + p.x
    }

    /// Whether the point lies on the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x < self.size && p.y < self.size
    }

    /// Color at a point; `None` for empty or off-board points.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Color> {
        if !self.contains(p) {
            return None;
        }
        self.cells[self.idx(p)]
    }

    /// Whether the point is on the grid and empty.
    #[inline]
    pub fn is_empty(&self, p: Point) -> bool {
        self.contains(p) && self.cells[self.idx(p)].is_none()
    }

    /// Set a cell. Off-board points are ignored.
    pub fn set(&mut self, p: Point, c: Option<Color>) {
        if self.contains(p) {
            let i = self.idx(p);
            self.cells[i] = c;
        }
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        (0..s).flat_map(move |y| (0..s).map(move |x| Point::new(x, y)))
    }

    /// The 4 orthogonal neighbors of a point that lie on the grid.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        let mut v = Vec::with_capacity(4);
        if p.x > 0 {
            v.push(Point::new(p.x - 1, p.y));
        }
        if p.y > 0 {
            v.push(Point::new(p.x, p.y - 1));
        }
        if p.x + 1 < s {
            v.push(Point::new(p.x + 1, p.y));
        }
        if p.y + 1 < s {
            v.push(Point::new(p.x, p.y + 1));
        }
        v.into_iter()
    }

    /// Number of stones of a color.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    /// Collect the maximal 4-connected set of same-content points containing `start`.
    ///
    /// Works for stones and for empty regions alike. An off-board start yields
    /// an empty group.
    pub fn group_of(&self, start: Point) -> Vec<Point> {
        if !self.contains(start) {
            return Vec::new();
        }
        let content = self.get(start);
        let mut visited = vec![false; self.cells.len()];
        self.flood(start, content, &mut visited)
    }

    fn flood(&self, start: Point, content: Option<Color>, visited: &mut [bool]) -> Vec<Point> {
        let mut group = Vec::new();
        let mut stack = vec![start];
        visited[self.idx(start)] = true;

        while let Some(p) = stack.pop() {
            group.push(p);
            for n in self.neighbors(p) {
                let i = self.idx(n);
                if !visited[i] && self.cells[i] == content {
                    visited[i] = true;
                    stack.push(n);
                }
            }
        }
        group
    }

    /// All maximal groups of the given color, in row-major order of their first stone.
    pub fn groups(&self, color: Color) -> Vec<Vec<Point>> {
        let mut visited = vec![false; self.cells.len()];
        let mut out = Vec::new();
        for p in self.points() {
            let i = self.idx(p);
            if !visited[i] && self.cells[i] == Some(color) {
                out.push(self.flood(p, Some(color), &mut visited));
            }
        }
        out
    }

    /// All maximal empty regions.
    pub fn empty_regions(&self) -> Vec<Vec<Point>> {
        let mut visited = vec![false; self.cells.len()];
        let mut out = Vec::new();
        for p in self.points() {
            let i = self.idx(p);
            if !visited[i] && self.cells[i].is_none() {
                out.push(self.flood(p, None, &mut visited));
            }
        }
        out
    }

    /// Count the distinct empty points adjacent to any member of the group.
    pub fn liberties_of(&self, group: &[Point]) -> usize {
        let mut seen = vec![false; self.cells.len()];
        let mut libs = 0;
        for &p in group {
            for n in self.neighbors(p) {
                let i = self.idx(n);
                if self.cells[i].is_none() && !seen[i] {
                    seen[i] = true;
                    libs += 1;
                }
            }
        }
        libs
    }

    /// Liberty count of the group at `p`; 0 for empty or off-board points.
    pub fn count_liberties(&self, p: Point) -> usize {
        if self.get(p).is_none() {
            return 0;
        }
        self.liberties_of(&self.group_of(p))
    }

    /// True if `p` is empty or its group has at least one liberty.
    ///
    /// Off-board points have no liberty.
    pub fn has_liberty(&self, p: Point) -> bool {
        if !self.contains(p) {
            return false;
        }
        match self.get(p) {
            None => true,
            Some(_) => self.count_liberties(p) > 0,
        }
    }
}
