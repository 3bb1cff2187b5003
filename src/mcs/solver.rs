//! Binary Monte Carlo savings search.
//!
//! # Algorithm
//!
//! The savings list is swept as in Clarke-Wright, but every merge that
//! would change the current solution is first put to a vote. From the
//! merged state ("take") and the unchanged state ("skip"), `R` randomized
//! completions each replay the rest of the list, accepting every
//! processable pair with probability `p`. The merge is adopted when the
//! summed lengths of the "take" completions compare favourably with the
//! "skip" ones under the configured [`DecisionRule`](super::DecisionRule).
//!
//! Every complete solution met on the way, in rollouts or on the main
//! trajectory, competes for the returned best.

use std::time::Duration;

use anyhow::Result;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::rollout::{keep_best, Batch};
use super::McsConfig;
use crate::models::{CvrpData, Solution};
use crate::savings::SavingsList;
use crate::solver::{Deadline, Solver};

/// Savings solver with a two-hypothesis Monte Carlo look-ahead.
///
/// All randomness comes from the generator handed to the constructor, so
/// runs with equal seeds and configuration are reproducible, sequential or
/// parallel.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_savings::mcs::{BinaryMcsSolver, McsConfig};
/// use u_savings::models::{Customer, CvrpInstance};
/// use u_savings::solver::Solver;
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
/// let mut solver = BinaryMcsSolver::seeded(McsConfig::default().with_rollouts(10), 42).unwrap();
/// let solution = solver.solve(&instance, 2, Duration::from_secs(5));
/// assert!(solution.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryMcsSolver<R = StdRng> {
    config: McsConfig,
    rng: R,
}

impl BinaryMcsSolver<StdRng> {
    /// Creates a solver over a [`StdRng`] seeded with `seed`.
    pub fn seeded(config: McsConfig, seed: u64) -> Result<Self> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BinaryMcsSolver<R> {
    /// Creates a solver drawing its randomness from `rng`.
    pub fn new(config: McsConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// The solver's configuration.
    pub fn config(&self) -> &McsConfig {
        &self.config
    }

    /// Runs the search over a precomputed savings list.
    pub fn search<'a, P: CvrpData + ?Sized>(
        &mut self,
        data: &'a P,
        savings: &SavingsList,
        vehicles: usize,
        deadline: &Deadline,
    ) -> Solution<'a, P> {
        let mut current = Solution::new(data, vehicles);
        let mut best = None;
        keep_best(&mut best, &current);

        for (k, entry) in savings.entries().iter().enumerate() {
            if current.is_complete() || deadline.expired() {
                break;
            }
            let pair = entry.pair();
            if !current.can_process(pair) {
                continue;
            }
            let (processed, inserted) = current.process(pair);
            if !inserted {
                continue;
            }

            let seeds: Vec<u64> = (0..self.config.rollouts)
                .map(|_| self.rng.random())
                .collect();
            let batch = Batch {
                take: &processed,
                skip: &current,
                remaining: savings.after(k),
                acceptance: self.config.acceptance,
            };
            let tally = batch.run(&seeds, deadline, self.config.parallel);

            if let Some(candidate) = &tally.best {
                if keep_best(&mut best, candidate) {
                    trace!("rollout best {:.3} at pair {:?}", candidate.length(), pair);
                }
            }

            let adopt = self.config.decision.adopt(tally.yes, tally.no);
            debug!(
                "pair {:?} saving {:.3}: yes {:.3} no {:.3} over {} rollouts, {}",
                pair,
                entry.saving,
                tally.yes,
                tally.no,
                tally.runs,
                if adopt { "take" } else { "skip" }
            );
            if adopt {
                current = processed;
                keep_best(&mut best, &current);
            }
        }

        best.unwrap_or(current)
    }
}

impl<R: Rng> Solver for BinaryMcsSolver<R> {
    fn solve<'a, P: CvrpData + ?Sized>(
        &mut self,
        data: &'a P,
        vehicles: usize,
        timeout: Duration,
    ) -> Solution<'a, P> {
        let deadline = Deadline::after(timeout);
        let savings = SavingsList::from_data(data);
        let solution = self.search(data, &savings, vehicles, &deadline);

        info!(
            "binary-mcs: length {:.3}, {}/{} customers, {} routes, {:?}",
            solution.length(),
            solution.allocated(),
            solution.customers(),
            solution.routes_used(),
            deadline.elapsed()
        );
        solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::ClarkeWrightSolver;
    use crate::mcs::DecisionRule;
    use crate::models::{Customer, CvrpInstance, Route};

    fn triangle() -> CvrpInstance {
        CvrpInstance::new(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(1, 0.0, 10.0, 5),
                Customer::new(2, 0.0, 20.0, 5),
                Customer::new(3, 10.0, 10.0, 5),
            ],
            15,
        )
        .expect("valid")
    }

    fn cluster() -> CvrpInstance {
        let mut customers = vec![Customer::depot(50.0, 50.0)];
        for id in 1..=14 {
            let x = (id * 37 % 100) as f64;
            let y = (id * 61 % 100) as f64;
            customers.push(Customer::new(id, x, y, 1 + (id % 4) as i32));
        }
        CvrpInstance::new(customers, 12).expect("valid")
    }

    fn routes<P: CvrpData + ?Sized>(sol: &Solution<'_, P>) -> Vec<Vec<usize>> {
        sol.routes().map(Route::ids).collect()
    }

    const BUDGET: Duration = Duration::from_secs(60);

    #[test]
    fn test_rejects_invalid_config() {
        assert!(BinaryMcsSolver::seeded(McsConfig::default().with_rollouts(0), 1).is_err());
        assert!(BinaryMcsSolver::seeded(McsConfig::default().with_acceptance(2.0), 1).is_err());
    }

    #[test]
    fn test_full_acceptance_matches_greedy_on_triangle() {
        let inst = triangle();
        let config = McsConfig::default().with_acceptance(1.0).with_rollouts(5);
        let mut solver = BinaryMcsSolver::seeded(config, 3).expect("valid");
        let sol = solver.solve(&inst, 2, BUDGET);

        assert!(sol.is_complete());
        assert_eq!(routes(&sol), vec![vec![1, 2, 3], vec![]]);
        let greedy = ClarkeWrightSolver.solve(&inst, 2, BUDGET);
        assert!((sol.length() - greedy.length()).abs() < 1e-9);
    }

    #[test]
    fn test_zero_acceptance_rejects_everything() {
        // skip replays stay shorter than any merge, so nothing is adopted
        let inst = triangle();
        let config = McsConfig::default().with_acceptance(0.0).with_rollouts(3);
        let mut solver = BinaryMcsSolver::seeded(config, 3).expect("valid");
        let sol = solver.solve(&inst, 2, BUDGET);
        assert!(!sol.is_complete());
        assert_eq!(sol.allocated(), 0);
    }

    #[test]
    fn test_same_seed_same_result() {
        let inst = cluster();
        let config = McsConfig::default().with_rollouts(8);
        let a = BinaryMcsSolver::seeded(config, 99)
            .expect("valid")
            .solve(&inst, 6, BUDGET);
        let b = BinaryMcsSolver::seeded(config, 99)
            .expect("valid")
            .solve(&inst, 6, BUDGET);
        assert_eq!(routes(&a), routes(&b));
        assert_eq!(a.length(), b.length());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let inst = cluster();
        let config = McsConfig::default().with_rollouts(8);
        let seq = BinaryMcsSolver::seeded(config, 5)
            .expect("valid")
            .solve(&inst, 6, BUDGET);
        let par = BinaryMcsSolver::seeded(config.with_parallel(true), 5)
            .expect("valid")
            .solve(&inst, 6, BUDGET);
        assert_eq!(routes(&seq), routes(&par));
        assert_eq!(seq.length(), par.length());
    }

    #[test]
    fn test_result_respects_capacity_and_membership() {
        let inst = cluster();
        let mut solver = BinaryMcsSolver::seeded(McsConfig::legacy().with_rollouts(6), 11)
            .expect("valid");
        let sol = solver.solve(&inst, 6, BUDGET);

        let mut seen = vec![0; inst.customers().len()];
        for route in sol.routes() {
            assert!(route.load() <= route.capacity());
            for id in route.iter() {
                seen[id] += 1;
            }
        }
        assert_eq!(seen[0], 0);
        assert!(seen.iter().all(|&c| c <= 1));
        if sol.is_complete() {
            assert!(seen[1..].iter().all(|&c| c == 1));
        }
    }

    #[test]
    fn test_complete_rollout_is_returned_when_merge_is_skipped() {
        // nothing remains after the only pair: "skip" replays score 0.0,
        // "take" replays score the merged route, so the main trajectory
        // skips, yet the complete take replay is kept as best
        let inst = CvrpInstance::new(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(1, 1.0, 0.0, 1),
                Customer::new(2, 2.0, 0.0, 1),
            ],
            10,
        )
        .expect("valid");
        for decision in [DecisionRule::NonStrict, DecisionRule::Strict] {
            let config = McsConfig::default()
                .with_acceptance(1.0)
                .with_rollouts(2)
                .with_decision(decision);
            assert!(!decision.adopt(2.0 * 4.0, 0.0));

            let mut solver = BinaryMcsSolver::seeded(config, 0).expect("valid");
            let sol = solver.solve(&inst, 1, BUDGET);
            assert!(sol.is_complete());
            assert_eq!(routes(&sol), vec![vec![1, 2]]);
            assert!((sol.length() - 4.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_zero_timeout_returns_partial() {
        let inst = cluster();
        let mut solver = BinaryMcsSolver::seeded(McsConfig::default(), 1).expect("valid");
        let sol = solver.solve(&inst, 6, Duration::ZERO);
        assert!(!sol.is_complete());
    }

    #[test]
    fn test_depot_only_is_complete() {
        let inst = CvrpInstance::new(vec![Customer::depot(0.0, 0.0)], 10).expect("valid");
        let mut solver = BinaryMcsSolver::seeded(McsConfig::default(), 1).expect("valid");
        let sol = solver.solve(&inst, 1, BUDGET);
        assert!(sol.is_complete());
        assert_eq!(sol.length(), 0.0);
    }
}
