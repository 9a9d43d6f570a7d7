use num_traits::PrimInt;
use rayon::prelude::*;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::{cmp::Reverse, collections::BinaryHeap, fmt::Debug, hash::Hash};
use tracing::debug;

use super::{union_find::UnionFind, Edge, Graph};

/// Below this many edges a sequential sort is faster than spinning up rayon.
const PARALLEL_SORT_THRESHOLD: usize = 1 << 14;

/// Lighter edges first, ties broken by the normalized endpoints so the chosen edge set is
/// reproducible regardless of insertion order.
fn by_weight_then_endpoints<N: Ord, W: Ord>(
    x: &&Edge<N, W>,
    y: &&Edge<N, W>,
) -> std::cmp::Ordering {
    x.weight
        .cmp(&y.weight)
        .then_with(|| x.a.cmp(&y.a))
        .then_with(|| x.b.cmp(&y.b))
}

/// Compute the minimum spanning forest of a graph with [Kruskal's algorithm](https://en.wikipedia.org/wiki/Kruskal%27s_algorithm) in O(E log E) time.
///
/// The result keeps every node of `graph` and holds one tree per connected component. The
/// input is left untouched. Once every node sits in one tree the remaining edges are skipped;
/// a disconnected graph has all of its edges considered.
pub fn build_mst<N, W>(graph: &Graph<N, W>) -> Graph<N, W>
where
    N: Copy + Ord + Hash + Debug + Send + Sync,
    W: PrimInt + Debug + Send + Sync,
{
    let mut forest = Graph::with_nodes(graph.nodes().iter().copied());
    let mut sets = UnionFind::from_nodes(graph.nodes().iter().copied());

    let mut edges: Vec<&Edge<N, W>> = graph.edges().iter().collect();
    if edges.len() >= PARALLEL_SORT_THRESHOLD {
        edges.par_sort_by(by_weight_then_endpoints);
    } else {
        edges.sort_by(by_weight_then_endpoints);
    }

    let mut considered = 0;
    for edge in edges {
        if sets.set_count() <= 1 {
            // Early stopping condition, the graph is already spanned by a single tree
            break;
        }
        considered += 1;
        if sets.union(edge.a, edge.b) {
            forest.push_edge(*edge);
        }
    }

    debug!(
        "Kruskal kept {} of {} edges after considering {}",
        forest.edge_count(),
        graph.edge_count(),
        considered
    );
    forest
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug)]
struct PriorityQueueEdge<N, W> {
    weight: W,
    from: N,
    to: N,
}

/// Compute the minimum spanning forest with [Prim's algorithm](https://en.wikipedia.org/wiki/Prim%27s_algorithm) in O(E log V) time.
///
/// Grows a tree from the first unvisited node of each component in turn. Produces the same
/// total weight as [`build_mst`]; on ties the chosen edges may differ.
pub fn prim_mst<N, W>(graph: &Graph<N, W>) -> Graph<N, W>
where
    N: Copy + Ord + Hash + Debug,
    W: PrimInt + Debug,
{
    let mut edges_by_vertex: HashMap<N, Vec<&Edge<N, W>>> = HashMap::default();
    edges_by_vertex.reserve(graph.node_count());
    for edge in graph.edges() {
        for endpoint in edge.endpoints() {
            edges_by_vertex.entry(endpoint).or_default().push(edge);
        }
    }

    let mut forest = Graph::with_nodes(graph.nodes().iter().copied());
    let mut in_mst = HashSet::default();
    in_mst.reserve(graph.node_count());
    let mut edge_priority_queue = BinaryHeap::new();

    let push_outgoing = |from: N,
                         in_mst: &HashSet<N>,
                         queue: &mut BinaryHeap<Reverse<PriorityQueueEdge<N, W>>>| {
        for edge in edges_by_vertex.get(&from).into_iter().flatten() {
            if let Some(to) = edge.other(from).filter(|to| !in_mst.contains(to)) {
                queue.push(Reverse(PriorityQueueEdge {
                    weight: edge.weight,
                    from,
                    to,
                }));
            }
        }
    };

    for &root in graph.nodes() {
        // Kickstart a new tree for each component not reached yet
        if !in_mst.insert(root) {
            continue;
        }
        push_outgoing(root, &in_mst, &mut edge_priority_queue);

        while let Some(Reverse(shortest_edge)) = edge_priority_queue.pop() {
            // Claim: the "from" of the shortest edge is always in the tree, because all edges
            // in the priority queue point outwards from the tree built so far.
            if !in_mst.insert(shortest_edge.to) {
                continue;
            }
            forest.push_edge(Edge::new(
                shortest_edge.from,
                shortest_edge.to,
                shortest_edge.weight,
            ));
            push_outgoing(shortest_edge.to, &in_mst, &mut edge_priority_queue);
        }
    }
    forest
}
