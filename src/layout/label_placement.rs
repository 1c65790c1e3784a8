// Octant-based label placement for node labels.
// All functions here work with pure geometry in data space, no scale
// mapping and no SVG dependency. Offsets are returned in canvas units.

use crate::ir::{Edge, Node};

const DEFAULT_LABEL_GAP: f64 = 5.0;
const SIDE_LABEL_GAP: f64 = 8.0;
const ABOVE_LABEL_GAP: f64 = 12.0;
const BELOW_LABEL_GAP: f64 = 15.0;

/// Displacement of a node's text relative to its drawn position. The node
/// circle itself is never moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelOffset {
    pub dx: f64,
    pub dy: f64,
}

impl LabelOffset {
    /// Offset for a node with no resolvable neighbors: to the right of the
    /// circle, vertically centered.
    pub fn isolated(node_radius: f64) -> Self {
        Self {
            dx: node_radius + DEFAULT_LABEL_GAP,
            dy: 0.0,
        }
    }
}

/// Occupancy flags for the 8 compass octants around a node, derived from the
/// directions of its incident edges. Rebuilt from scratch on every placement
/// call; holds no state between passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DirectionBuckets {
    right: bool,
    bottom_right: bool,
    bottom: bool,
    bottom_left: bool,
    left: bool,
    top_left: bool,
    top: bool,
    top_right: bool,
}

impl DirectionBuckets {
    /// Classify an edge direction into exactly one octant and mark it.
    /// `angle` is in degrees, range (-180, 180], screen orientation
    /// (y grows downward, so positive angles point below the node).
    fn mark(&mut self, angle: f64) {
        if (-22.5..22.5).contains(&angle) {
            self.right = true;
        } else if (22.5..67.5).contains(&angle) {
            self.bottom_right = true;
        } else if (67.5..112.5).contains(&angle) {
            self.bottom = true;
        } else if (112.5..157.5).contains(&angle) {
            self.bottom_left = true;
        } else if angle >= 157.5 || angle < -157.5 {
            self.left = true;
        } else if (-157.5..-112.5).contains(&angle) {
            self.top_left = true;
        } else if (-112.5..-67.5).contains(&angle) {
            self.top = true;
        } else {
            self.top_right = true;
        }
    }

    fn top_side_clear(&self) -> bool {
        !self.top && !self.top_left && !self.top_right
    }

    fn bottom_side_clear(&self) -> bool {
        !self.bottom && !self.bottom_left && !self.bottom_right
    }

    fn right_side_clear(&self) -> bool {
        !self.right && !self.top_right && !self.bottom_right
    }

    fn left_side_clear(&self) -> bool {
        !self.left && !self.top_left && !self.bottom_left
    }
}

/// Pick a label offset for `node` that avoids its own incident edges.
///
/// Greedy single pass: only directly incident edges count, other nodes'
/// labels are never consulted, and there is no iterative refinement. The
/// horizontal and vertical components are chosen independently, each by its
/// own clear-side priority, so the pair is deterministic but not guaranteed
/// jointly optimal. O(edges) per call.
pub fn place(node: &Node, nodes: &[Node], edges: &[Edge], node_radius: f64) -> LabelOffset {
    match occupied_directions(node, nodes, edges) {
        Some(buckets) => LabelOffset {
            dx: horizontal_offset(&buckets, node_radius),
            dy: vertical_offset(&buckets, node_radius),
        },
        None => LabelOffset::isolated(node_radius),
    }
}

/// Build the occupancy buckets from the node's incident edges. Returns None
/// when no incident edge resolves to a real neighbor: a node whose edges all
/// dangle is placed exactly like a node with no edges at all.
fn occupied_directions(node: &Node, nodes: &[Node], edges: &[Edge]) -> Option<DirectionBuckets> {
    let mut buckets = DirectionBuckets::default();
    let mut resolved_any = false;

    for edge in edges {
        let other_id = if edge.source == node.id {
            &edge.target
        } else if edge.target == node.id {
            &edge.source
        } else {
            continue;
        };
        let Some(other) = nodes.iter().find(|candidate| candidate.id == *other_id) else {
            continue;
        };
        let angle = (other.y - node.y).atan2(other.x - node.x).to_degrees();
        buckets.mark(angle);
        resolved_any = true;
    }

    resolved_any.then_some(buckets)
}

/// Horizontal component. Fully clear sides (cardinal plus both diagonals)
/// win in top, bottom, right, left order; otherwise fall back to whichever
/// cardinal alone is clear, defaulting to the right of the node.
fn horizontal_offset(buckets: &DirectionBuckets, node_radius: f64) -> f64 {
    if buckets.top_side_clear() {
        0.0
    } else if buckets.bottom_side_clear() {
        0.0
    } else if buckets.right_side_clear() {
        node_radius + SIDE_LABEL_GAP
    } else if buckets.left_side_clear() {
        -(node_radius + SIDE_LABEL_GAP)
    } else if !buckets.top || !buckets.bottom {
        0.0
    } else if !buckets.right {
        node_radius + SIDE_LABEL_GAP
    } else if !buckets.left {
        -(node_radius + SIDE_LABEL_GAP)
    } else {
        node_radius + SIDE_LABEL_GAP
    }
}

/// Vertical component, mirroring the horizontal priority order.
fn vertical_offset(buckets: &DirectionBuckets, node_radius: f64) -> f64 {
    if buckets.top_side_clear() {
        -(node_radius + ABOVE_LABEL_GAP)
    } else if buckets.bottom_side_clear() {
        node_radius + BELOW_LABEL_GAP
    } else if buckets.right_side_clear() {
        0.0
    } else if buckets.left_side_clear() {
        0.0
    } else if !buckets.top {
        -(node_radius + ABOVE_LABEL_GAP)
    } else if !buckets.bottom {
        node_radius + BELOW_LABEL_GAP
    } else if !buckets.right || !buckets.left {
        0.0
    } else {
        -(node_radius + ABOVE_LABEL_GAP)
    }
}
