//! Spatial indexing for neighbour queries

pub mod quadtree;

pub use quadtree::{Circle, QuadPoint, QuadTree, Rect};
