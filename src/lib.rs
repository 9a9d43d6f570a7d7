//! Small weighted graphs, Kruskal minimum spanning forests and a binary min-heap.
//!
//! The crate produces plain in-memory values ([`graph::Graph`], [`heap::MinHeap`]) that a
//! visualizer can consume read-only. Nothing here draws or animates.

/// Weighted undirected graphs and the algorithms over them
pub mod graph;
/// A binary min-heap with heap-sort
pub mod heap;

pub use graph::{generate::GeneratorConfig, mst::build_mst, Edge, Graph};
pub use heap::{heap_sort, MinHeap};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Generator parameters out of range.
    #[error("invalid argument `{arg}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        arg: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// Extraction from a heap with no keys.
    #[error("cannot extract from an empty heap")]
    EmptyHeap,
    /// An edge must join two distinct nodes.
    #[error("self loop on node {0}")]
    SelfLoop(String),
    /// An edge endpoint that was never added as a node.
    #[error("node {0} is not in the graph")]
    UnknownNode(String),
}
