use num_traits::PrimInt;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::Serialize;
use std::{fmt::Debug, hash::Hash};

use crate::{Error, Result};

/// Generate random [Erdős–Rényi](https://en.wikipedia.org/wiki/Erd%C5%91s%E2%80%93R%C3%A9nyi_model) style weighted graphs
pub mod generate;
/// Find the [Minimum Spanning Tree (MST)](https://en.wikipedia.org/wiki/Minimum_spanning_tree)
pub mod mst;
/// [Disjoint-set forest](https://en.wikipedia.org/wiki/Disjoint-set_data_structure) with path compression and union by rank
pub mod union_find;

/// An undirected weighted edge.
///
/// Endpoints are stored normalized (`a < b`) so `(u, v)` and `(v, u)` compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Edge<N, W> {
    pub a: N,
    pub b: N,
    pub weight: W,
}

impl<N: Copy + Ord, W> Edge<N, W> {
    pub fn new(u: N, v: N, weight: W) -> Self {
        let (a, b) = if u <= v { (u, v) } else { (v, u) };
        Self { a, b, weight }
    }

    pub fn endpoints(&self) -> [N; 2] {
        [self.a, self.b]
    }

    /// The endpoint opposite to `node`, if `node` is on this edge.
    pub fn other(&self, node: N) -> Option<N> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// A simple undirected graph with weighted edges.
///
/// Nodes and edges keep their insertion order, which makes every algorithm over the graph
/// deterministic. There is at most one edge per unordered pair of nodes and no self loops.
#[derive(Clone, Debug, Serialize)]
pub struct Graph<N, W = i64>
where
    N: Eq + Hash,
{
    nodes: Vec<N>,
    edges: Vec<Edge<N, W>>,
    #[serde(skip)]
    node_set: HashSet<N>,
    #[serde(skip)]
    edge_index: HashMap<[N; 2], usize>,
}

impl<N: Eq + Hash, W> Default for Graph<N, W> {
    fn default() -> Self {
        Self {
            nodes: vec![],
            edges: vec![],
            node_set: HashSet::default(),
            edge_index: HashMap::default(),
        }
    }
}

impl<N: Eq + Hash, W: PartialEq> PartialEq for Graph<N, W> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges
    }
}

impl<N, W> Graph<N, W>
where
    N: Copy + Ord + Hash + Debug,
    W: Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes(nodes: impl IntoIterator<Item = N>) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        graph
    }

    /// Build a graph from `(u, v, weight)` triples, adding endpoints as they are first seen.
    ///
    /// Later duplicates of an already connected pair are ignored.
    pub fn from_edges(edges: impl IntoIterator<Item = (N, N, W)>) -> Result<Self> {
        let mut graph = Self::new();
        for (u, v, weight) in edges {
            graph.add_node(u);
            graph.add_node(v);
            graph.add_edge(u, v, weight)?;
        }
        Ok(graph)
    }

    /// Returns false if the node was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        if !self.node_set.insert(node) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Connect `u` and `v`.
    ///
    /// Returns false, leaving the existing weight in place, if the pair is already connected.
    pub fn add_edge(&mut self, u: N, v: N, weight: W) -> Result<bool> {
        if u == v {
            return Err(Error::SelfLoop(format!("{:?}", u)));
        }
        for node in [u, v] {
            if !self.node_set.contains(&node) {
                return Err(Error::UnknownNode(format!("{:?}", node)));
            }
        }
        if self.edge_weight(u, v).is_some() {
            return Ok(false);
        }
        self.push_edge(Edge::new(u, v, weight));
        Ok(true)
    }

    /// Append an edge whose endpoints are known members and not yet connected.
    pub(crate) fn push_edge(&mut self, edge: Edge<N, W>) {
        debug_assert!(edge.a != edge.b);
        debug_assert!(self.node_set.contains(&edge.a) && self.node_set.contains(&edge.b));
        self.edge_index.insert(edge.endpoints(), self.edges.len());
        self.edges.push(edge);
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge<N, W>] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, node: N) -> bool {
        self.node_set.contains(&node)
    }

    pub fn edge_weight(&self, u: N, v: N) -> Option<W> {
        let key = if u <= v { [u, v] } else { [v, u] };
        self.edge_index.get(&key).map(|&i| self.edges[i].weight)
    }

    /// Nodes adjacent to `node` along with the connecting edge weight, in edge insertion order.
    pub fn neighbors(&self, node: N) -> impl Iterator<Item = (N, W)> + '_ {
        self.edges
            .iter()
            .filter_map(move |edge| edge.other(node).map(|other| (other, edge.weight)))
    }

    /// Number of connected components, counting isolated nodes.
    pub fn connected_components(&self) -> usize {
        let mut sets = union_find::UnionFind::from_nodes(self.nodes.iter().copied());
        for edge in &self.edges {
            sets.union(edge.a, edge.b);
        }
        sets.set_count()
    }
}

impl<N, W> Graph<N, W>
where
    N: Copy + Ord + Hash + Debug,
    W: PrimInt,
{
    /// Sum of all edge weights, or `None` if it does not fit in `W`.
    pub fn total_weight(&self) -> Option<W> {
        self.edges
            .iter()
            .try_fold(W::zero(), |total, edge| total.checked_add(&edge.weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn edges_are_undirected() {
        let mut graph = Graph::with_nodes(0..3);
        assert!(graph.add_edge(2, 0, 7).unwrap());
        assert_eq!(graph.edge_weight(0, 2), Some(7));
        assert_eq!(graph.edge_weight(2, 0), Some(7));
        assert_eq!(graph.edges(), &[Edge { a: 0, b: 2, weight: 7 }]);
    }

    #[test]
    fn duplicate_pairs_keep_first_weight() {
        let mut graph = Graph::with_nodes(0..2);
        assert!(graph.add_edge(0, 1, 3).unwrap());
        assert!(!graph.add_edge(1, 0, 9).unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight(0, 1), Some(3));
    }

    #[test]
    fn rejects_self_loops_and_unknown_nodes() {
        let mut graph: Graph<usize> = Graph::with_nodes(0..2);
        assert_eq!(graph.add_edge(1, 1, 1), Err(Error::SelfLoop("1".into())));
        assert_eq!(graph.add_edge(0, 5, 1), Err(Error::UnknownNode("5".into())));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn from_edges_adds_nodes_on_demand() {
        let graph = Graph::from_edges([('a', 'b', 5), ('b', 'c', 1), ('a', 'c', 6)]).unwrap();
        assert_eq!(graph.nodes(), &['a', 'b', 'c']);
        assert_eq!(graph.total_weight(), Some(12));
        assert_eq!(
            graph.neighbors('a').collect::<Vec<_>>(),
            vec![('b', 5), ('c', 6)]
        );
    }

    #[test]
    fn total_weight_reports_overflow() {
        let graph = Graph::from_edges([(0, 1, i64::MAX - 1), (1, 2, i64::MAX)]).unwrap();
        assert_eq!(graph.total_weight(), None);
        let graph = Graph::from_edges([(0, 1, i64::MAX - 1), (1, 2, 1)]).unwrap();
        assert_eq!(graph.total_weight(), Some(i64::MAX));
        let graph = Graph::from_edges([(0u8, 1u8, i8::MIN), (1, 2, -1)]).unwrap();
        assert_eq!(graph.total_weight(), None);
    }

    #[test]
    fn counts_components_including_isolated_nodes() {
        let mut graph = Graph::with_nodes(0..6);
        graph.add_edge(0, 1, 1).unwrap();
        graph.add_edge(1, 2, 1).unwrap();
        graph.add_edge(3, 4, 1).unwrap();
        assert_eq!(graph.connected_components(), 3);
        assert_eq!(Graph::<usize>::new().connected_components(), 0);
    }

    #[test]
    fn serializes_nodes_and_edges_only() {
        let graph = Graph::from_edges([(1usize, 0usize, 4i64)]).unwrap();
        assert_eq!(
            serde_json::to_value(&graph).unwrap(),
            serde_json::json!({
                "nodes": [1, 0],
                "edges": [{ "a": 0, "b": 1, "weight": 4 }],
            })
        );
    }
}
