//! QuadTree - frame-scoped spatial index
//!
//! Rebuilt from scratch every tick: `clear()` then one `insert` per particle.
//! Nodes live in a flat arena addressed by index. `clear()` only resets the live
//! count, so steady-state frames reuse node slots and their point vectors instead
//! of reallocating the tree.
//!
//! Points stay in the node that accepted them; once a node is full it subdivides
//! (at most once per frame) and later points go to the child quadrant.

mod rect;

pub use rect::{Circle, Rect};

/// Subdivision stops here; deeper points pile up in the leaf.
/// Keeps coincident points (a settled flock) from recursing forever.
pub const MAX_DEPTH: u8 = 12;

const NO_CHILD: u32 = u32::MAX;

// Depth-first stack bound: each level pops one node and pushes four
const QUERY_STACK: usize = 4 * (MAX_DEPTH as usize + 1);

/// A particle reference stored in the tree
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadPoint {
    pub x: f32,
    pub y: f32,
    pub index: u32,
}

struct Node {
    bounds: Rect,
    points: Vec<QuadPoint>,
    // Index of the NW child; NE, SW, SE follow contiguously
    first_child: u32,
    depth: u8,
}

impl Node {
    fn reset(&mut self, bounds: Rect, depth: u8) {
        self.bounds = bounds;
        self.points.clear();
        self.first_child = NO_CHILD;
        self.depth = depth;
    }
}

pub struct QuadTree {
    nodes: Vec<Node>,
    live: usize,
    capacity: usize,
    len: usize,
}

impl QuadTree {
    /// `capacity` is how many points a node holds before subdividing (min 1)
    pub fn new(bounds: Rect, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let root = Node {
            bounds,
            points: Vec::with_capacity(capacity),
            first_child: NO_CHILD,
            depth: 0,
        };
        Self { nodes: vec![root], live: 1, capacity, len: 0 }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.nodes[0].bounds
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points stored this frame
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live nodes this frame
    #[inline]
    pub fn node_count(&self) -> usize {
        self.live
    }

    /// Node slots ever allocated (live + reusable)
    #[cfg(test)]
    fn allocated_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Drop every point and subdivision, keeping the root bounds
    pub fn clear(&mut self) {
        let bounds = self.nodes[0].bounds;
        self.nodes[0].reset(bounds, 0);
        self.live = 1;
        self.len = 0;
    }

    /// `clear()` with new root bounds (viewport change)
    pub fn reset(&mut self, bounds: Rect) {
        self.nodes[0].reset(bounds, 0);
        self.live = 1;
        self.len = 0;
    }

    /// Change node capacity; takes effect from the next rebuild
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
    }

    /// Store a point. Returns false when it lies outside the root region.
    pub fn insert(&mut self, point: QuadPoint) -> bool {
        if !self.nodes[0].bounds.contains(point.x, point.y) {
            return false;
        }

        let mut node = 0usize;
        loop {
            if self.nodes[node].first_child == NO_CHILD {
                let n = &self.nodes[node];
                if n.points.len() < self.capacity || n.depth >= MAX_DEPTH {
                    self.nodes[node].points.push(point);
                    self.len += 1;
                    return true;
                }
                self.subdivide(node);
            }

            let n = &self.nodes[node];
            let quadrant = n.bounds.quadrant_of(point.x, point.y);
            node = n.first_child as usize + quadrant;
        }
    }

    /// Append every stored point within `circle` to `out`.
    ///
    /// Traversal order is deterministic: a node's own points first, then its
    /// children NW, NE, SW, SE depth-first.
    pub fn query(&self, circle: &Circle, out: &mut Vec<QuadPoint>) {
        let mut stack = [0u32; QUERY_STACK];
        let mut top = 1usize;

        while top > 0 {
            top -= 1;
            let node = &self.nodes[stack[top] as usize];
            if !node.bounds.intersects(circle) {
                continue;
            }

            for p in node.points.iter() {
                if circle.contains(p.x, p.y) {
                    out.push(*p);
                }
            }

            if node.first_child != NO_CHILD {
                // Reverse push so NW pops first
                for q in (0..4u32).rev() {
                    stack[top] = node.first_child + q;
                    top += 1;
                }
            }
        }
    }

    fn subdivide(&mut self, node: usize) {
        let first = self.live;
        let depth = self.nodes[node].depth + 1;
        let quadrants = self.nodes[node].bounds.quadrants();

        for (offset, bounds) in quadrants.into_iter().enumerate() {
            let slot = first + offset;
            if slot < self.nodes.len() {
                self.nodes[slot].reset(bounds, depth);
            } else {
                self.nodes.push(Node {
                    bounds,
                    points: Vec::with_capacity(self.capacity),
                    first_child: NO_CHILD,
                    depth,
                });
            }
        }

        self.live += 4;
        self.nodes[node].first_child = first as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xorshift(state: &mut u32) -> f32 {
        *state ^= *state << 13;
        *state ^= *state >> 17;
        *state ^= *state << 5;
        (*state >> 8) as f32 / (1u32 << 24) as f32
    }

    fn random_points(n: usize, seed: u32) -> Vec<QuadPoint> {
        let mut s = seed;
        (0..n)
            .map(|i| QuadPoint {
                x: xorshift(&mut s) * 500.0,
                y: xorshift(&mut s) * 300.0,
                index: i as u32,
            })
            .collect()
    }

    fn tree_with(points: &[QuadPoint], capacity: usize) -> QuadTree {
        let mut tree = QuadTree::new(Rect::from_corners(0.0, 0.0, 500.0, 300.0), capacity);
        for p in points {
            assert!(tree.insert(*p));
        }
        tree
    }

    fn sorted_indices(found: &[QuadPoint]) -> Vec<u32> {
        let mut ids: Vec<u32> = found.iter().map(|p| p.index).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn query_matches_brute_force() {
        let points = random_points(2000, 0xBEEF);
        let tree = tree_with(&points, 4);

        for (cx, cy, r) in [(250.0, 150.0, 40.0), (0.0, 0.0, 25.0), (499.0, 10.0, 60.0), (120.0, 280.0, 5.0)] {
            let circle = Circle::new(cx, cy, r);
            let mut found = Vec::new();
            tree.query(&circle, &mut found);

            let mut expected: Vec<u32> = points
                .iter()
                .filter(|p| {
                    let dx = p.x - cx;
                    let dy = p.y - cy;
                    dx * dx + dy * dy <= r * r
                })
                .map(|p| p.index)
                .collect();
            expected.sort_unstable();

            assert_eq!(sorted_indices(&found), expected);
        }
    }

    #[test]
    fn query_result_is_independent_of_insert_order() {
        let points = random_points(700, 7);
        let mut reversed = points.clone();
        reversed.reverse();

        let a = tree_with(&points, 3);
        let b = tree_with(&reversed, 3);
        let circle = Circle::new(200.0, 120.0, 70.0);

        let mut fa = Vec::new();
        let mut fb = Vec::new();
        a.query(&circle, &mut fa);
        b.query(&circle, &mut fb);
        assert_eq!(sorted_indices(&fa), sorted_indices(&fb));
    }

    #[test]
    fn insert_outside_root_is_rejected() {
        let mut tree = QuadTree::new(Rect::from_corners(0.0, 0.0, 100.0, 100.0), 4);
        assert!(!tree.insert(QuadPoint { x: -0.5, y: 10.0, index: 0 }));
        // Right/bottom edges are exclusive
        assert!(!tree.insert(QuadPoint { x: 100.0, y: 10.0, index: 1 }));
        assert!(tree.insert(QuadPoint { x: 0.0, y: 0.0, index: 2 }));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn boundary_point_is_counted_once() {
        // Force subdivision, then put a point exactly on the centre lines
        let mut tree = QuadTree::new(Rect::from_corners(0.0, 0.0, 100.0, 100.0), 1);
        assert!(tree.insert(QuadPoint { x: 10.0, y: 10.0, index: 0 }));
        assert!(tree.insert(QuadPoint { x: 50.0, y: 50.0, index: 1 }));
        assert!(tree.node_count() > 1);

        let mut found = Vec::new();
        tree.query(&Circle::new(50.0, 50.0, 1.0), &mut found);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].index, 1);
    }

    #[test]
    fn subdivides_only_when_full() {
        let mut tree = QuadTree::new(Rect::from_corners(0.0, 0.0, 100.0, 100.0), 4);
        for i in 0..4 {
            tree.insert(QuadPoint { x: 10.0 + i as f32, y: 10.0, index: i });
        }
        assert_eq!(tree.node_count(), 1);

        tree.insert(QuadPoint { x: 90.0, y: 90.0, index: 4 });
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn coincident_points_stop_at_max_depth() {
        let mut tree = QuadTree::new(Rect::from_corners(0.0, 0.0, 100.0, 100.0), 2);
        for i in 0..500 {
            assert!(tree.insert(QuadPoint { x: 33.0, y: 33.0, index: i }));
        }
        assert_eq!(tree.len(), 500);
        assert_eq!(tree.node_count(), 1 + 4 * MAX_DEPTH as usize);

        let mut found = Vec::new();
        tree.query(&Circle::new(33.0, 33.0, 0.5), &mut found);
        assert_eq!(found.len(), 500);
    }

    #[test]
    fn clear_reuses_arena_slots() {
        let points = random_points(1000, 99);
        let mut tree = tree_with(&points, 4);
        let allocated = tree.allocated_nodes();

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 1);

        for p in &points {
            tree.insert(*p);
        }
        assert_eq!(tree.allocated_nodes(), allocated);

        let mut found = Vec::new();
        tree.query(&Circle::new(250.0, 150.0, 1000.0), &mut found);
        assert_eq!(found.len(), 1000);
    }

    #[test]
    fn traversal_order_is_stable() {
        let points = random_points(300, 3);
        let tree = tree_with(&points, 4);
        let circle = Circle::new(250.0, 150.0, 90.0);

        let mut first = Vec::new();
        let mut second = Vec::new();
        tree.query(&circle, &mut first);
        tree.query(&circle, &mut second);
        assert_eq!(first, second);
    }
}
