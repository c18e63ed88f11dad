//! Graph and grid types for the gridwalk search
//! workspace.
//!
//! This crate provides geometry primitives, the flat node arena that search
//! algorithms operate on, rectangular grid construction with 4- or
//! 8-directional adjacency, and random wall placement.

pub mod geom;
pub mod graph;
pub mod grid;
pub mod mapgen;

pub use geom::{Point, Range};
pub use graph::{Graph, GraphNode, NodeId};
pub use grid::{GridGraph, Topology};
pub use mapgen::{DEFAULT_WALL_PROBABILITY, WallGen};
