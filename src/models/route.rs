//! Capacity-bounded routes with endpoint-only insertion.

use std::collections::VecDeque;
use std::fmt;

use super::{CvrpData, Node, NodeArena};

/// An ordered sequence of node ids served by one vehicle.
///
/// The depot is implicit at both ends and not stored. Nodes can only be
/// inserted at the front or the back, and the load never exceeds the
/// capacity. The route length is maintained incrementally on insertion.
///
/// # Examples
///
/// ```
/// use u_savings::models::{Customer, CvrpInstance, Node, NodeArena, Route};
///
/// let instance = CvrpInstance::new(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 0.0, 10.0, 5),
///         Customer::new(2, 0.0, 20.0, 5),
///     ],
///     15,
/// )
/// .unwrap();
/// let mut arena = NodeArena::new(vec![Node::new(1, 5), Node::new(2, 5)]);
/// let block = [*arena.get(1).unwrap(), *arena.get(2).unwrap()];
///
/// let mut route = Route::new(0, 0, 15);
/// assert!(route.can_allocate(&block));
/// route.allocate(&block, true, &mut arena, &instance);
/// assert_eq!(route.ids(), vec![1, 2]);
/// assert_eq!(route.load(), 10);
/// assert!((route.length() - 40.0).abs() < 1e-10);
/// assert_eq!(arena.get(2).unwrap().route_allocation(), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    slot: usize,
    depot: usize,
    capacity: i32,
    load: i32,
    length: f64,
    ids: VecDeque<usize>,
}

impl Route {
    /// Creates an empty route occupying vehicle slot `slot`.
    pub fn new(slot: usize, depot: usize, capacity: i32) -> Self {
        Self {
            slot,
            depot,
            capacity,
            load: 0,
            length: 0.0,
            ids: VecDeque::new(),
        }
    }

    /// Vehicle slot of this route within its solution.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Maximum load.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Sum of the demands currently served.
    pub fn load(&self) -> i32 {
        self.load
    }

    /// Remaining capacity.
    pub fn free(&self) -> i32 {
        self.capacity - self.load
    }

    /// Number of nodes (depot excluded).
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if this route serves no node.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Node ids in visiting order.
    pub fn ids(&self) -> Vec<usize> {
        self.ids.iter().copied().collect()
    }

    /// Iterates node ids in visiting order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.ids.iter().copied()
    }

    /// First node after the depot.
    pub fn first(&self) -> Option<usize> {
        self.ids.front().copied()
    }

    /// Last node before returning to the depot.
    pub fn last(&self) -> Option<usize> {
        self.ids.back().copied()
    }

    /// Returns `true` if `id` is the first node of this route.
    pub fn is_first(&self, id: usize) -> bool {
        self.first() == Some(id)
    }

    /// Returns `true` if `id` is the last node of this route.
    pub fn is_last(&self, id: usize) -> bool {
        self.last() == Some(id)
    }

    /// Returns `true` if `id` is served by this route.
    pub fn contains(&self, id: usize) -> bool {
        self.ids.contains(&id)
    }

    /// Returns `true` if `id` is a member but neither the first nor the last.
    pub fn is_interior(&self, id: usize) -> bool {
        !self.is_first(id) && !self.is_last(id) && self.contains(id)
    }

    /// Depot → first → … → last → depot distance, 0 when empty.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns `true` if the combined demand of `nodes` fits.
    pub fn can_allocate(&self, nodes: &[Node]) -> bool {
        let extra: i32 = nodes.iter().map(Node::demand).sum();
        self.load + extra <= self.capacity
    }

    /// Inserts `nodes` as one contiguous block, after the last node when
    /// `append` is set and before the first node otherwise, and points each
    /// node's back-reference in `arena` at this route.
    ///
    /// The caller must have checked [`can_allocate`](Self::can_allocate).
    pub fn allocate<P: CvrpData + ?Sized>(
        &mut self,
        nodes: &[Node],
        append: bool,
        arena: &mut NodeArena,
        data: &P,
    ) {
        let (Some(head), Some(tail)) = (nodes.first(), nodes.last()) else {
            return;
        };
        debug_assert!(self.can_allocate(nodes), "route {} over capacity", self.slot);

        let inner: f64 = nodes
            .windows(2)
            .map(|w| data.distance(w[0].id(), w[1].id()))
            .sum();

        self.length += match (self.first(), self.last()) {
            (Some(_), Some(last)) if append => {
                data.distance(last, head.id()) + inner + data.distance(tail.id(), self.depot)
                    - data.distance(last, self.depot)
            }
            (Some(first), Some(_)) => {
                data.distance(self.depot, head.id()) + inner + data.distance(tail.id(), first)
                    - data.distance(self.depot, first)
            }
            _ => {
                data.distance(self.depot, head.id()) + inner + data.distance(tail.id(), self.depot)
            }
        };

        if append {
            self.ids.extend(nodes.iter().map(Node::id));
        } else {
            for node in nodes.iter().rev() {
                self.ids.push_front(node.id());
            }
        }

        for node in nodes {
            self.load += node.demand();
            if let Some(owned) = arena.get_mut(node.id()) {
                owned.set_route(self.slot);
            }
        }
    }

    /// Recomputes the length from scratch against `data`.
    pub fn measure<P: CvrpData + ?Sized>(&self, data: &P) -> f64 {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return 0.0;
        };
        let inner: f64 = self
            .ids
            .iter()
            .zip(self.ids.iter().skip(1))
            .map(|(&a, &b)| data.distance(a, b))
            .sum();
        data.distance(self.depot, first) + inner + data.distance(last, self.depot)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (k, id) in self.ids.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{id}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, CvrpInstance};

    fn instance() -> CvrpInstance {
        CvrpInstance::new(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(1, 0.0, 10.0, 5),
                Customer::new(2, 0.0, 20.0, 5),
                Customer::new(3, 10.0, 10.0, 5),
                Customer::new(4, 10.0, 0.0, 5),
            ],
            15,
        )
        .expect("valid")
    }

    fn arena() -> NodeArena {
        NodeArena::new((1..=4).map(|id| Node::new(id, 5)).collect())
    }

    fn nodes(arena: &NodeArena, ids: &[usize]) -> Vec<Node> {
        ids.iter()
            .map(|&id| *arena.get(id).expect("known id"))
            .collect()
    }

    #[test]
    fn test_empty_route() {
        let r = Route::new(1, 0, 15);
        assert!(r.is_empty());
        assert_eq!(r.length(), 0.0);
        assert_eq!(r.load(), 0);
        assert_eq!(r.slot(), 1);
        assert!(r.first().is_none());
        assert!(!r.is_interior(1));
        assert_eq!(r.to_string(), "[]");
    }

    #[test]
    fn test_append_and_prepend() {
        let inst = instance();
        let mut arena = arena();
        let mut r = Route::new(0, 0, 15);

        let block = nodes(&arena, &[1, 2]);
        r.allocate(&block, true, &mut arena, &inst);
        let three = nodes(&arena, &[3]);
        r.allocate(&three, false, &mut arena, &inst);

        assert_eq!(r.ids(), vec![3, 1, 2]);
        assert_eq!(r.load(), 15);
        assert!(r.is_first(3));
        assert!(r.is_last(2));
        assert!(r.is_interior(1));
        assert!(!r.is_interior(4));
        assert!((r.length() - r.measure(&inst)).abs() < 1e-9);
        assert_eq!(r.to_string(), "[3, 1, 2]");
        assert_eq!(arena.get(3).and_then(Node::route_allocation), Some(0));
    }

    #[test]
    fn test_prepend_block_keeps_order() {
        let inst = instance();
        let mut arena = arena();
        let mut r = Route::new(0, 0, 20);
        r.allocate(&nodes(&arena, &[1]), true, &mut arena, &inst);
        r.allocate(&nodes(&arena, &[3, 4]), false, &mut arena, &inst);
        assert_eq!(r.ids(), vec![3, 4, 1]);
        assert!((r.length() - r.measure(&inst)).abs() < 1e-9);
    }

    #[test]
    fn test_capacity_check() {
        let inst = instance();
        let mut arena = arena();
        let mut r = Route::new(0, 0, 10);
        let block = nodes(&arena, &[1, 2]);
        assert!(r.can_allocate(&block));
        r.allocate(&block, true, &mut arena, &inst);
        assert!(!r.can_allocate(&nodes(&arena, &[3])));
        assert!(r.can_allocate(&[]));
        assert_eq!(r.free(), 0);
    }

    #[test]
    fn test_single_node_length() {
        let inst = instance();
        let mut arena = arena();
        let mut r = Route::new(0, 0, 15);
        r.allocate(&nodes(&arena, &[2]), true, &mut arena, &inst);
        assert!((r.length() - 40.0).abs() < 1e-10);
        assert!(!r.is_interior(2));
    }
}
