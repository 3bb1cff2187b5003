//! Solver invocation contract and wall-clock budget.

use std::time::{Duration, Instant};

use crate::models::{CvrpData, Solution};

/// A CVRP solver.
///
/// `solve` returns within `timeout` plus at most one in-flight unit of
/// work. Running out of time is not an error: the returned solution may be
/// incomplete, which callers detect with [`Solution::is_complete`].
pub trait Solver {
    /// Builds routes for `data` using `vehicles` identical vehicles.
    fn solve<'a, P: CvrpData + ?Sized>(
        &mut self,
        data: &'a P,
        vehicles: usize,
        timeout: Duration,
    ) -> Solution<'a, P>;
}

/// A cooperative deadline, checked between units of work.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Duration,
}

impl Deadline {
    /// Starts a budget of `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }

    /// Time spent since the deadline was started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns `true` once the elapsed time exceeds the budget.
    pub fn expired(&self) -> bool {
        self.elapsed() > self.budget
    }
}
