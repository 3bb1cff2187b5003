//! Concrete CVRP instance.

use anyhow::{ensure, Result};

use super::{Customer, CvrpData};
use crate::distance::DistanceMatrix;

/// A CVRP instance over positionally indexed customers.
///
/// Customer 0 is the depot; every other customer's id equals its position.
/// Edges are enumerated as `(i, j)` with `i < j` in ascending id order.
///
/// # Examples
///
/// ```
/// use u_savings::models::{Customer, CvrpData, CvrpInstance};
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
/// assert_eq!(instance.depot(), 0);
/// assert_eq!(instance.capacity(), 15);
/// assert!((instance.distance(0, 2) - 20.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct CvrpInstance {
    customers: Vec<Customer>,
    distances: DistanceMatrix,
    capacity: i32,
}

impl CvrpInstance {
    /// Builds a Euclidean instance.
    pub fn new(customers: Vec<Customer>, capacity: i32) -> Result<Self> {
        let distances = DistanceMatrix::euclidean(&customers);
        Self::with_distances(customers, distances, capacity)
    }

    /// Builds an instance over an explicit distance matrix.
    pub fn with_distances(
        customers: Vec<Customer>,
        distances: DistanceMatrix,
        capacity: i32,
    ) -> Result<Self> {
        ensure!(!customers.is_empty(), "instance needs at least a depot");
        ensure!(capacity > 0, "capacity must be positive, got {capacity}");
        ensure!(
            distances.size() == customers.len(),
            "distance matrix has {} rows for {} customers",
            distances.size(),
            customers.len()
        );
        for (pos, c) in customers.iter().enumerate() {
            ensure!(c.id() == pos, "customer at position {pos} has id {}", c.id());
            ensure!(c.demand() >= 0, "customer {} has negative demand", c.id());
        }
        Ok(Self {
            customers,
            distances,
            capacity,
        })
    }

    /// All locations (index 0 = depot).
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// The underlying distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }
}

impl CvrpData for CvrpInstance {
    fn depot(&self) -> usize {
        0
    }

    fn nodes(&self) -> Vec<usize> {
        (0..self.customers.len()).collect()
    }

    fn distance(&self, a: usize, b: usize) -> f64 {
        self.distances.get(a, b)
    }

    fn capacity(&self) -> i32 {
        self.capacity
    }

    fn demand(&self, id: usize) -> i32 {
        self.customers[id].demand()
    }

    fn num_customers(&self) -> usize {
        self.customers.len() - 1
    }
}
