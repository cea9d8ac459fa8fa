//! Arena view of the mind-map node forest.
//!
//! Nodes are stored by id together with a parent -> children adjacency
//! index. The parent relation is not guaranteed to be a tree: a node may
//! point at a parent that no longer exists (treated as a root) and rows
//! edited outside the service could even form a cycle. Traversals keep a
//! visited set so neither case can loop or lose nodes.
//!
//! Chains can be arbitrarily deep, so the walk uses an explicit stack and
//! the forest is returned flat (pre-order, with depth and child ids) rather
//! than as nested values.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::types::DbId;

/// Identity and parent link of a node stored in the arena.
pub trait GraphNode {
    fn id(&self) -> DbId;
    fn parent_id(&self) -> Option<DbId>;
}

/// One node of the forest, borrowing the arena's node.
#[derive(Debug, Serialize)]
pub struct ForestEntry<'a, N> {
    #[serde(flatten)]
    pub node: &'a N,
    /// Distance from the root of its tree (roots are 0).
    pub depth: usize,
    /// Ids of the nodes placed directly under this one, ascending.
    pub children: Vec<DbId>,
}

/// Flat forest: tree roots plus every node exactly once in depth-first
/// pre-order, so each tree is a contiguous run starting at its root.
#[derive(Debug, Serialize)]
pub struct Forest<'a, N> {
    pub roots: Vec<DbId>,
    pub nodes: Vec<ForestEntry<'a, N>>,
}

/// Node arena keyed by id with a parent -> children index.
#[derive(Debug)]
pub struct NodeArena<N> {
    nodes: BTreeMap<DbId, N>,
    children: HashMap<DbId, Vec<DbId>>,
}

impl<N: GraphNode> NodeArena<N> {
    /// Build the arena. Children lists are ordered by ascending id.
    pub fn new(nodes: Vec<N>) -> Self {
        let nodes: BTreeMap<DbId, N> = nodes.into_iter().map(|n| (n.id(), n)).collect();

        let mut children: HashMap<DbId, Vec<DbId>> = HashMap::new();
        for node in nodes.values() {
            if let Some(parent) = node.parent_id() {
                if parent != node.id() && nodes.contains_key(&parent) {
                    children.entry(parent).or_default().push(node.id());
                }
            }
        }

        Self { nodes, children }
    }

    /// Ids of the direct children of `id` (empty if none or unknown).
    pub fn children_of(&self, id: DbId) -> &[DbId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids of the nodes with no parent, a self-reference, or a parent that is
    /// not in the arena, in ascending order.
    pub fn roots(&self) -> Vec<DbId> {
        self.nodes
            .values()
            .filter(|n| match n.parent_id() {
                None => true,
                Some(parent) => parent == n.id() || !self.nodes.contains_key(&parent),
            })
            .map(GraphNode::id)
            .collect()
    }

    /// Forest of every node in the arena.
    ///
    /// Each node appears exactly once. Nodes that cannot be reached from a
    /// root (members of a parent cycle) start extra trees, lowest id first.
    pub fn forest(&self) -> Forest<'_, N> {
        let mut visited = HashSet::with_capacity(self.nodes.len());
        let mut forest = Forest {
            roots: Vec::new(),
            nodes: Vec::with_capacity(self.nodes.len()),
        };

        let starts = self.roots().into_iter().chain(self.nodes.keys().copied());
        for start in starts {
            if visited.insert(start) {
                forest.roots.push(start);
                self.walk(start, &mut visited, &mut forest.nodes);
            }
        }

        forest
    }

    fn walk<'a>(
        &'a self,
        root: DbId,
        visited: &mut HashSet<DbId>,
        out: &mut Vec<ForestEntry<'a, N>>,
    ) {
        let mut stack = vec![(root, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            let children: Vec<DbId> = self
                .children_of(id)
                .iter()
                .copied()
                .filter(|&child| visited.insert(child))
                .collect();
            // Reversed so the lowest id is popped (and emitted) first.
            stack.extend(children.iter().rev().map(|&child| (child, depth + 1)));
            out.push(ForestEntry {
                node,
                depth,
                children,
            });
        }
    }
}
