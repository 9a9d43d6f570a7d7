use rustc_hash::FxHashMap as HashMap;
use std::{cmp::Ordering, hash::Hash};

/// Partition of nodes into disjoint sets.
///
/// Every node points at a parent; a node that is its own parent represents its set. Only
/// representatives carry a rank, an upper bound on the height of their tree.
#[derive(Debug, Clone)]
pub struct UnionFind<N> {
    parent: HashMap<N, N>,
    rank: HashMap<N, u32>,
    sets: usize,
}

impl<N: Copy + Eq + Hash> Default for UnionFind<N> {
    fn default() -> Self {
        Self {
            parent: HashMap::default(),
            rank: HashMap::default(),
            sets: 0,
        }
    }
}

impl<N: Copy + Eq + Hash> UnionFind<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Singleton sets for each node.
    pub fn from_nodes(nodes: impl IntoIterator<Item = N>) -> Self {
        let mut sets = Self::new();
        for node in nodes {
            sets.make_set(node);
        }
        sets
    }

    /// Returns false if the node is already tracked.
    pub fn make_set(&mut self, node: N) -> bool {
        if self.parent.contains_key(&node) {
            return false;
        }
        self.parent.insert(node, node);
        self.rank.insert(node, 0);
        self.sets += 1;
        true
    }

    /// Representative of the set containing `node`, or `None` for an untracked node.
    ///
    /// Every node on the path walked is re-pointed straight at the representative.
    pub fn find(&mut self, node: N) -> Option<N> {
        let mut root = node;
        loop {
            let parent = *self.parent.get(&root)?;
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut current = node;
        while let Some(next) = self.parent.insert(current, root) {
            if next == root {
                break;
            }
            current = next;
        }
        Some(root)
    }

    /// Merge the sets containing `u` and `v`, tracking either node first if needed.
    ///
    /// Returns false when both were already in the same set, i.e. an edge between them would
    /// close a cycle.
    pub fn union(&mut self, u: N, v: N) -> bool {
        let root_u = self.root(u);
        let root_v = self.root(v);
        if root_u == root_v {
            return false;
        }

        let rank_u = self.rank.get(&root_u).copied().unwrap_or_default();
        let rank_v = self.rank.get(&root_v).copied().unwrap_or_default();
        let (parent, child) = match rank_u.cmp(&rank_v) {
            Ordering::Less => (root_v, root_u),
            Ordering::Greater => (root_u, root_v),
            Ordering::Equal => {
                self.rank.insert(root_u, rank_u + 1);
                (root_u, root_v)
            }
        };
        self.parent.insert(child, parent);
        self.rank.remove(&child);
        self.sets -= 1;
        true
    }

    pub fn connected(&mut self, u: N, v: N) -> bool {
        match (self.find(u), self.find(v)) {
            (Some(root_u), Some(root_v)) => root_u == root_v,
            _ => false,
        }
    }

    fn root(&mut self, node: N) -> N {
        self.make_set(node);
        self.find(node).unwrap_or(node)
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Number of tracked nodes.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}
