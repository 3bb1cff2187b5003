//! Nodes and the per-solution node arena.

use std::collections::HashMap;
use std::sync::Arc;

/// A customer as seen by one [`Solution`](super::Solution).
///
/// The route back-reference is the slot index of the route currently
/// holding this node, or `None` while unallocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    id: usize,
    demand: i32,
    route: Option<usize>,
}

impl Node {
    /// Creates an unallocated node.
    pub fn new(id: usize, demand: i32) -> Self {
        Self {
            id,
            demand,
            route: None,
        }
    }

    /// External node id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Demand carried by whichever route serves this node.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Slot of the route holding this node.
    pub fn route_allocation(&self) -> Option<usize> {
        self.route
    }

    /// Returns `true` if some route holds this node.
    pub fn is_allocated(&self) -> bool {
        self.route.is_some()
    }

    pub(crate) fn set_route(&mut self, route: usize) {
        self.route = Some(route);
    }
}

/// Owned node storage of a solution, addressed by external node id.
///
/// The id → position table never changes after construction and is shared
/// between clones; only the node states are copied.
#[derive(Debug, Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
    index: Arc<HashMap<usize, usize>>,
}

impl NodeArena {
    /// Builds an arena of unallocated nodes.
    pub fn new(nodes: Vec<Node>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(pos, node)| (node.id(), pos))
            .collect();
        Self {
            nodes,
            index: Arc::new(index),
        }
    }

    /// Looks up a node by id.
    pub fn get(&self, id: usize) -> Option<&Node> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    /// Looks up a node by id, mutably.
    pub fn get_mut(&mut self, id: usize) -> Option<&mut Node> {
        let pos = *self.index.get(&id)?;
        Some(&mut self.nodes[pos])
    }

    /// Iterates over all nodes in construction order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
