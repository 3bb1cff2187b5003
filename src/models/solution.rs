//! Partial and complete route assignments.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CvrpData, Node, NodeArena, Route};

/// A fixed fleet of routes plus the allocation state of every customer.
///
/// A solution owns its nodes and routes; the problem data is only
/// borrowed. [`process`](Self::process) never mutates the receiver, and
/// clones are fully independent, back-references included.
///
/// # Examples
///
/// ```
/// use u_savings::models::{Customer, CvrpInstance, Solution};
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
///
/// let empty = Solution::new(&instance, 2);
/// assert!(empty.can_process((1, 2)));
///
/// let (merged, inserted) = empty.process((1, 2));
/// assert!(inserted);
/// assert!(merged.is_complete());
/// assert!(!empty.is_complete());
/// assert!((merged.length() - 40.0).abs() < 1e-10);
/// ```
pub struct Solution<'a, P: CvrpData + ?Sized> {
    data: &'a P,
    routes: Vec<Route>,
    nodes: NodeArena,
    allocated: usize,
}

impl<'a, P: CvrpData + ?Sized> Solution<'a, P> {
    /// Creates a solution with `vehicles` empty routes and every customer
    /// unallocated.
    pub fn new(data: &'a P, vehicles: usize) -> Self {
        let depot = data.depot();
        let capacity = data.capacity();
        let nodes = data
            .nodes()
            .into_iter()
            .filter(|&id| id != depot)
            .map(|id| Node::new(id, data.demand(id)))
            .collect();
        Self {
            data,
            routes: (0..vehicles)
                .map(|slot| Route::new(slot, depot, capacity))
                .collect(),
            nodes: NodeArena::new(nodes),
            allocated: 0,
        }
    }

    /// The problem this solution belongs to.
    pub fn data(&self) -> &'a P {
        self.data
    }

    /// Resolves two external ids to this solution's nodes.
    ///
    /// Returns `None` if either id is the depot or unknown.
    pub fn get_pair(&self, (a, b): (usize, usize)) -> Option<(&Node, &Node)> {
        Some((self.nodes.get(a)?, self.nodes.get(b)?))
    }

    /// Cheap pre-filter for [`process`](Self::process): `true` while at
    /// least one node of the pair is still unallocated.
    pub fn can_process(&self, pair: (usize, usize)) -> bool {
        if pair.0 == pair.1 || self.is_complete() {
            return false;
        }
        match self.get_pair(pair) {
            Some((i, j)) => !i.is_allocated() || !j.is_allocated(),
            None => false,
        }
    }

    /// Merges `pair` into a copy of this solution.
    ///
    /// Returns the copy and whether any node was inserted. When nothing
    /// could be inserted the copy is identical to `self`.
    pub fn process(&self, pair: (usize, usize)) -> (Self, bool) {
        let mut next = self.clone();
        let inserted = next.apply(pair);
        (next, inserted)
    }

    /// In-place form of [`process`](Self::process).
    ///
    /// Two unallocated nodes are appended together to the first route with
    /// room for both. A single unallocated node is attached next to its
    /// allocated partner when the partner sits at an end of its route.
    pub fn apply(&mut self, (a, b): (usize, usize)) -> bool {
        if a == b {
            return false;
        }
        let (Some(&i), Some(&j)) = (self.nodes.get(a), self.nodes.get(b)) else {
            return false;
        };

        match (i.route_allocation(), j.route_allocation()) {
            (None, None) => {
                let pair = [i, j];
                match self.routes.iter_mut().find(|r| r.can_allocate(&pair)) {
                    Some(route) => {
                        route.allocate(&pair, true, &mut self.nodes, self.data);
                        self.allocated += 2;
                        true
                    }
                    None => false,
                }
            }
            (Some(slot), None) => self.attach(i, j, slot),
            (None, Some(slot)) => self.attach(j, i, slot),
            (Some(_), Some(_)) => false,
        }
    }

    fn attach(&mut self, anchor: Node, candidate: Node, slot: usize) -> bool {
        let route = &mut self.routes[slot];
        if route.is_interior(anchor.id()) || !route.can_allocate(&[candidate]) {
            return false;
        }
        let append = route.is_last(anchor.id());
        route.allocate(&[candidate], append, &mut self.nodes, self.data);
        self.allocated += 1;
        true
    }

    /// Returns `true` once every customer is on a route.
    pub fn is_complete(&self) -> bool {
        self.allocated == self.nodes.len()
    }

    /// Total length over all routes.
    pub fn length(&self) -> f64 {
        self.routes.iter().map(Route::length).sum()
    }

    /// Routes in vehicle-slot order, empty ones included.
    pub fn routes(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    /// Number of vehicle slots.
    pub fn vehicles(&self) -> usize {
        self.routes.len()
    }

    /// Number of non-empty routes.
    pub fn routes_used(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// The route currently serving `id`.
    pub fn route_of(&self, id: usize) -> Option<&Route> {
        let slot = self.nodes.get(id)?.route_allocation()?;
        self.routes.get(slot)
    }

    /// This solution's node for `id`.
    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Number of customers on some route.
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    /// Number of customers (depot excluded).
    pub fn customers(&self) -> usize {
        self.nodes.len()
    }

    /// Serializable snapshot for reporting.
    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary {
            routes: self
                .routes
                .iter()
                .map(|r| RouteSummary {
                    ids: r.ids(),
                    load: r.load(),
                    length: r.length(),
                })
                .collect(),
            length: self.length(),
            complete: self.is_complete(),
        }
    }
}

impl<P: CvrpData + ?Sized> Clone for Solution<'_, P> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            routes: self.routes.clone(),
            nodes: self.nodes.clone(),
            allocated: self.allocated,
        }
    }
}

impl<P: CvrpData + ?Sized> fmt::Debug for Solution<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solution")
            .field("routes", &self.routes)
            .field("allocated", &self.allocated)
            .field("customers", &self.nodes.len())
            .finish()
    }
}

/// One route of a [`SolutionSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Node ids in visiting order.
    pub ids: Vec<usize>,
    /// Total demand served.
    pub load: i32,
    /// Route length.
    pub length: f64,
}

/// Owned, serializable view of a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionSummary {
    /// Routes in vehicle-slot order.
    pub routes: Vec<RouteSummary>,
    /// Total length.
    pub length: f64,
    /// Whether every customer is served.
    pub complete: bool,
}
