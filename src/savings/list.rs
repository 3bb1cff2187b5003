//! Ordered savings list.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::CvrpData;

/// A candidate merge of two customers and its saving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsEntry {
    /// First customer, as enumerated by the problem's edges.
    pub i: usize,
    /// Second customer.
    pub j: usize,
    /// `d(depot, i) + d(depot, j) - d(i, j)`.
    pub saving: f64,
}

impl SavingsEntry {
    /// The pair as `(i, j)`.
    pub fn pair(&self) -> (usize, usize) {
        (self.i, self.j)
    }
}

/// Every customer pair ordered by descending saving.
///
/// Pairs with equal savings keep the order in which
/// [`CvrpData::edges`] enumerated them. Edges touching the depot are
/// dropped, and a pair enumerated in both orientations is kept once, in
/// the orientation seen first.
///
/// # Examples
///
/// ```
/// use u_savings::models::{Customer, CvrpInstance};
/// use u_savings::savings::SavingsList;
///
/// let instance = CvrpInstance::new(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 0.0, 10.0, 5),
///         Customer::new(2, 0.0, 20.0, 5),
///         Customer::new(3, 10.0, 10.0, 5),
///     ],
///     15,
/// )
/// .unwrap();
///
/// let savings = SavingsList::from_data(&instance);
/// assert_eq!(savings.pairs().collect::<Vec<_>>(), vec![(1, 2), (2, 3), (1, 3)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SavingsList {
    entries: Vec<SavingsEntry>,
}

impl SavingsList {
    /// Computes and orders the savings of every customer pair of `data`.
    pub fn from_data<P: CvrpData + ?Sized>(data: &P) -> Self {
        let depot = data.depot();
        let mut seen = HashSet::new();
        let mut entries: Vec<SavingsEntry> = data
            .edges()
            .into_iter()
            .filter(|&(i, j)| i != depot && j != depot && i != j)
            .filter(|&(i, j)| seen.insert((i.min(j), i.max(j))))
            .map(|(i, j)| SavingsEntry {
                i,
                j,
                saving: data.distance(depot, i) + data.distance(depot, j) - data.distance(i, j),
            })
            .collect();

        // stable: ties keep edge order
        entries.sort_by(|a, b| b.saving.total_cmp(&a.saving));
        Self { entries }
    }

    /// Entries in saving-descending order.
    pub fn entries(&self) -> &[SavingsEntry] {
        &self.entries
    }

    /// Pairs in saving-descending order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.entries.iter().map(SavingsEntry::pair)
    }

    /// Entries strictly after position `k`.
    pub fn after(&self, k: usize) -> &[SavingsEntry] {
        self.entries.get(k + 1..).unwrap_or(&[])
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there is no pair to merge.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
