//! Monte Carlo Tree Search driver.
//!
//! Each iteration runs the four classic phases:
//! - Select: descend by a UCT score whose exploration term tapers as a child
//!   takes a larger share of its parent's visits, with occasional random
//!   descent to avoid collapsing onto one line
//! - Expand: replay the path onto a scratch board and add children for a
//!   restricted candidate set (see [`crate::candidates`])
//! - Simulate: a short capture-scored playout (see [`crate::playout`])
//! - Backpropagate: update every node up to the root from its mover's view
//!
//! The loop stops at the iteration cap or the wall-clock budget, whichever
//! comes first. The deadline is only checked between iterations.

use std::time::{Duration, Instant};

use crate::board::Board;
use crate::candidates::{Preference, expansion_candidates};
use crate::config::SearchConfig;
use crate::constants::{PROB_RANDOM_DESCENT, RANDOM_DESCENT_VISITS};
use crate::playout::mcplayout;
use crate::tree::{Node, NodeId, ROOT, SearchError, SearchTree};

/// Summary of one search run.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub iterations: usize,
    pub nodes: usize,
    pub elapsed: Duration,
    /// Why the search stopped before its budget, if it did
    pub aborted: Option<SearchError>,
}

/// UCT score of a child with a visit-share decay on the exploration term.
///
/// Unvisited children score +inf so they are always tried first.
fn uct_score(child: &Node, parent_visits: u32, exploration: f64) -> f64 {
    if child.visits == 0 {
        return f64::INFINITY;
    }
    let v = child.visits as f64;
    let pv = parent_visits as f64;
    let exploitation = child.wins / v;
    let decay = (2.0 - v / (pv + 1.0)).sqrt();
    exploitation + exploration * decay * (pv.ln() / v).sqrt()
}

/// Select the child with the highest UCT score (first one on ties).
fn most_urgent(tree: &SearchTree, id: NodeId, exploration: f64) -> NodeId {
    let node = tree.node(id);
    let mut best = node.children[0];
    let mut best_score = f64::NEG_INFINITY;
    for &c in &node.children {
        let score = uct_score(tree.node(c), node.visits, exploration);
        if score > best_score {
            best_score = score;
            best = c;
        }
    }
    best
}

/// Descend from the root to a leaf.
pub fn select(tree: &SearchTree, config: &SearchConfig, rng: &mut fastrand::Rng) -> NodeId {
    let mut id = ROOT;
    loop {
        let node = tree.node(id);
        if node.is_leaf() {
            return id;
        }
        id = if rng.f64() < PROB_RANDOM_DESCENT && node.visits > RANDOM_DESCENT_VISITS {
            node.children[rng.usize(..node.children.len())]
        } else {
            most_urgent(tree, id, config.exploration)
        };
    }
}

/// Rebuild the position at `id` by replaying its moves from the root, in order.
///
/// The result is a [`Board::rollout`] copy: it keeps no history.
pub fn replay(tree: &SearchTree, id: NodeId, root_board: &Board) -> Board {
    let mut board = root_board.rollout();
    for mv in tree.path_to(id) {
        if let Err(e) = board.place_stone(mv) {
            log::debug!("replay stopped at {mv}: {e}");
            break;
        }
    }
    board
}

/// Expand a leaf and return the child to simulate together with its position.
///
/// A leaf without candidates is terminal; it is returned unchanged.
pub fn expand(
    tree: &mut SearchTree,
    id: NodeId,
    root_board: &Board,
    config: &SearchConfig,
    rng: &mut fastrand::Rng,
) -> Result<(NodeId, Board), SearchError> {
    let mut board = replay(tree, id, root_board);
    let candidates = expansion_candidates(&board, config.radius);
    if candidates.is_empty() {
        return Ok((id, board));
    }

    tree.add_children(id, &candidates)?;

    let player = tree.node(id).to_play;
    let pick = Preference::random(rng).pick(&board, &candidates, player, rng);
    let child = tree.node(id).children[pick];
    if let Err(e) = board.place_stone(candidates[pick]) {
        log::debug!("expansion move {} rejected: {e}", candidates[pick]);
    }
    Ok((child, board))
}

/// Add one playout result to `leaf` and all its ancestors.
///
/// `value` is from the point of view of the player who moved into `leaf`;
/// nodes entered by the other player receive `1 - value`.
pub fn backpropagate(tree: &mut SearchTree, leaf: NodeId, value: f64) {
    let owner = tree.node(leaf).mover();
    let mut cur = Some(leaf);
    while let Some(id) = cur {
        let node = tree.node_mut(id);
        node.visits += 1;
        node.wins += if node.mover() == owner {
            value
        } else {
            1.0 - value
        };
        cur = node.parent;
    }
}

/// Run the search loop on `tree`, whose root is the position `board`.
///
/// Growth failures end the search early; the tree keeps whatever statistics
/// it has gathered.
pub fn run_mcts(
    tree: &mut SearchTree,
    board: &Board,
    config: &SearchConfig,
    rng: &mut fastrand::Rng,
) -> SearchStats {
    let start = Instant::now();
    let mut stats = SearchStats::default();

    while stats.iterations < config.max_iterations && start.elapsed() < config.time_budget {
        let selected = select(tree, config, rng);

        let (leaf, mut scratch) = match expand(tree, selected, board, config, rng) {
            Ok(expanded) => expanded,
            Err(e) => {
                log::warn!("search aborted after {} iterations: {e}", stats.iterations);
                stats.aborted = Some(e);
                break;
            }
        };

        let owner = tree.node(leaf).mover();
        let value = mcplayout(&mut scratch, owner, config.radius, rng);
        backpropagate(tree, leaf, value);
        stats.iterations += 1;
    }

    stats.nodes = tree.len();
    stats.elapsed = start.elapsed();
    log::debug!(
        "search: {} iterations, {} nodes in {:?}",
        stats.iterations,
        stats.nodes,
        stats.elapsed
    );
    stats
}

/// Log per-child statistics of the root at debug level.
pub fn dump_children(tree: &SearchTree, size: usize) {
    for child in tree.root_children() {
        if let Some(mv) = child.mv {
            log::debug!(
                "move {} v={} w={:.1} wr={:.3}",
                mv.to_gtp(size),
                child.visits,
                child.wins,
                child.winrate()
            );
        }
    }
}
