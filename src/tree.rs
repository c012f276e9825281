//! Arena-allocated search tree.
//!
//! Nodes live in one `Vec` and refer to each other by index. A node owns
//! the ids in its `children` list; `parent` is a plain back-reference.
//! Dropping the tree frees every node at once.

use std::collections::TryReserveError;

use crate::grid::{Color, Point};

/// Index of a node in its tree.
pub type NodeId = usize;

/// The root is always the first node.
pub const ROOT: NodeId = 0;

/// Failures while growing the tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("search tree is full ({0} nodes)")]
    TreeFull(usize),
    #[error("out of memory growing the search tree: {0}")]
    OutOfMemory(#[from] TryReserveError),
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Move that led here (`None` for the root)
    pub mv: Option<Point>,
    /// Player to move from this position
    pub to_play: Color,
    /// Number of visits
    pub visits: u32,
    /// Accumulated value for the player who moved into this node
    pub wins: f64,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(mv: Option<Point>, to_play: Color, parent: Option<NodeId>) -> Self {
        Self {
            mv,
            to_play,
            visits: 0,
            wins: 0.0,
            parent,
            children: Vec::new(),
        }
    }

    /// The player whose move created this node; its value is kept from that
    /// player's point of view.
    #[inline]
    pub fn mover(&self) -> Color {
        self.to_play.opponent()
    }

    /// Mean value, or -0.1 for unvisited nodes.
    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.visits > 0 {
            self.wins / self.visits as f64
        } else {
            -0.1
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

pub struct SearchTree {
    nodes: Vec<Node>,
    max_nodes: usize,
}

impl SearchTree {
    /// Create a tree holding only a root for a position with `to_play` to move.
    pub fn new(to_play: Color, max_nodes: usize) -> Self {
        Self {
            nodes: vec![Node::new(None, to_play, None)],
            max_nodes: max_nodes.max(1),
        }
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append one unvisited child per move under `parent`.
    ///
    /// Fails without modifying the tree if the node budget would be exceeded
    /// or memory cannot be reserved.
    pub fn add_children(&mut self, parent: NodeId, moves: &[Point]) -> Result<(), SearchError> {
        if self.nodes.len() + moves.len() > self.max_nodes {
            return Err(SearchError::TreeFull(self.nodes.len()));
        }
        self.nodes.try_reserve(moves.len())?;
        self.nodes[parent].children.try_reserve_exact(moves.len())?;

        let to_play = self.nodes[parent].to_play.opponent();
        for &mv in moves {
            let id = self.nodes.len();
            self.nodes.push(Node::new(Some(mv), to_play, Some(parent)));
            self.nodes[parent].children.push(id);
        }
        Ok(())
    }

    /// Moves from the root down to `id`, in playing order.
    pub fn path_to(&self, id: NodeId) -> Vec<Point> {
        let mut moves = Vec::new();
        let mut cur = Some(id);
        while let Some(n) = cur {
            let node = &self.nodes[n];
            if let Some(mv) = node.mv {
                moves.push(mv);
            }
            cur = node.parent;
        }
        moves.reverse();
        moves
    }

    /// The most visited child of the root, first one on ties.
    pub fn best_child(&self) -> Option<&Node> {
        let mut best: Option<&Node> = None;
        for &c in &self.root().children {
            let child = &self.nodes[c];
            if best.is_none_or(|b| child.visits > b.visits) {
                best = Some(child);
            }
        }
        best
    }

    /// Root children, for reporting.
    pub fn root_children(&self) -> impl Iterator<Item = &Node> {
        self.root().children.iter().map(|&c| &self.nodes[c])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_children_links_both_ways() {
        let mut tree = SearchTree::new(Color::Black, 100);
        tree.add_children(ROOT, &[Point::new(1, 1), Point::new(2, 2)])
            .unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root().children, vec![1, 2]);
        let child = tree.node(2);
        assert_eq!(child.parent, Some(ROOT));
        assert_eq!(child.mv, Some(Point::new(2, 2)));
        assert_eq!(child.to_play, Color::White);
        assert_eq!(child.mover(), Color::Black);
        assert!(child.is_leaf());
    }

    #[test]
    fn test_path_to_is_root_first() {
        let mut tree = SearchTree::new(Color::Black, 100);
        tree.add_children(ROOT, &[Point::new(1, 1)]).unwrap();
        tree.add_children(1, &[Point::new(2, 2)]).unwrap();
        tree.add_children(2, &[Point::new(3, 3)]).unwrap();
        assert_eq!(
            tree.path_to(3),
            vec![Point::new(1, 1), Point::new(2, 2), Point::new(3, 3)]
        );
        assert!(tree.path_to(ROOT).is_empty());
    }

    #[test]
    fn test_node_budget() {
        let mut tree = SearchTree::new(Color::Black, 3);
        let moves = [Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)];
        assert_eq!(
            tree.add_children(ROOT, &moves),
            Err(SearchError::TreeFull(1))
        );
        assert_eq!(tree.len(), 1, "failed growth leaves the tree untouched");
        assert!(tree.add_children(ROOT, &moves[..2]).is_ok());
    }

    #[test]
    fn test_best_child_by_visits() {
        let mut tree = SearchTree::new(Color::Black, 100);
        assert!(tree.best_child().is_none());
        tree.add_children(
            ROOT,
            &[Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)],
        )
        .unwrap();
        tree.node_mut(1).visits = 3;
        tree.node_mut(1).wins = 3.0;
        tree.node_mut(2).visits = 5;
        tree.node_mut(3).visits = 5;
        let best = tree.best_child().unwrap();
        assert_eq!(best.mv, Some(Point::new(1, 0)));
    }

    #[test]
    fn test_winrate() {
        let mut tree = SearchTree::new(Color::Black, 10);
        assert_eq!(tree.root().winrate(), -0.1);
        tree.node_mut(ROOT).visits = 4;
        tree.node_mut(ROOT).wins = 1.0;
        assert_eq!(tree.root().winrate(), 0.25);
    }
}
