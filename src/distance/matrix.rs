//! Dense distance matrix.

use crate::models::Customer;

/// A dense n×n distance matrix stored in row-major order, indexed by
/// customer id.
///
/// # Examples
///
/// ```
/// use u_savings::models::Customer;
/// use u_savings::distance::DistanceMatrix;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 0.0, 10.0, 5),
///     Customer::new(2, 0.0, 20.0, 5),
/// ];
/// let dm = DistanceMatrix::euclidean(&customers);
/// assert_eq!(dm.size(), 3);
/// assert!((dm.get(1, 2) - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the Euclidean matrix of the given customers, in slice order.
    pub fn euclidean(customers: &[Customer]) -> Self {
        let size = customers.len();
        let mut data = vec![0.0; size * size];
        for (i, a) in customers.iter().enumerate() {
            for (j, b) in customers.iter().enumerate().skip(i + 1) {
                let d = a.distance_to(b);
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Self { data, size }
    }

    /// Builds a matrix from explicit rows.
    ///
    /// Returns `None` unless every row has exactly as many entries as there
    /// are rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            data: rows.into_iter().flatten().collect(),
            size,
        })
    }

    /// Distance from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either id is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `d(i, j)` and `d(j, i)` agree within `tol` everywhere.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.size).all(|i| {
            ((i + 1)..self.size).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol)
        })
    }
}
