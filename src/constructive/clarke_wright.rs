//! Clarke-Wright savings construction.
//!
//! # Algorithm
//!
//! Starting from empty routes, customer pairs are visited in decreasing
//! order of savings (Clarke & Wright, 1964). Every pair with at least one
//! unallocated customer is merged greedily: two free customers open a
//! segment on the first route with room, a free customer joins its partner
//! when the partner sits at an end of its route. There is no backtracking.
//!
//! # Complexity
//!
//! O(n² log n) for the savings list, plus one solution copy per accepted
//! merge.
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use std::time::Duration;

use log::info;

use crate::models::{CvrpData, Solution};
use crate::savings::SavingsList;
use crate::solver::{Deadline, Solver};

/// Deterministic single-pass savings solver.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_savings::constructive::ClarkeWrightSolver;
/// use u_savings::models::{Customer, CvrpInstance};
/// use u_savings::solver::Solver;
///
/// let instance = CvrpInstance::new(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 1.0, 0.0, 10),
///         Customer::new(2, 2.0, 0.0, 10),
///         Customer::new(3, 3.0, 0.0, 10),
///     ],
///     30,
/// )
/// .unwrap();
///
/// let solution = ClarkeWrightSolver.solve(&instance, 2, Duration::from_secs(1));
/// assert!(solution.is_complete());
/// assert_eq!(solution.routes_used(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ClarkeWrightSolver;

impl ClarkeWrightSolver {
    /// Runs the greedy sweep over a precomputed savings list.
    pub fn sweep<'a, P: CvrpData + ?Sized>(
        &self,
        data: &'a P,
        savings: &SavingsList,
        vehicles: usize,
        deadline: &Deadline,
    ) -> Solution<'a, P> {
        let mut solution = Solution::new(data, vehicles);

        for pair in savings.pairs() {
            if solution.is_complete() {
                break;
            }
            if solution.can_process(pair) {
                solution = solution.process(pair).0;
            }
            if deadline.expired() {
                break;
            }
        }
        solution
    }
}

impl Solver for ClarkeWrightSolver {
    fn solve<'a, P: CvrpData + ?Sized>(
        &mut self,
        data: &'a P,
        vehicles: usize,
        timeout: Duration,
    ) -> Solution<'a, P> {
        let deadline = Deadline::after(timeout);
        let savings = SavingsList::from_data(data);
        let solution = self.sweep(data, &savings, vehicles, &deadline);

        info!(
            "clarke-wright: length {:.3}, {}/{} customers, {} routes, {:?}",
            solution.length(),
            solution.allocated(),
            solution.customers(),
            solution.routes_used(),
            deadline.elapsed()
        );
        solution
    }
}
