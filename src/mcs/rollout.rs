//! Randomized completions used to score the "take" and "skip" hypotheses.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::models::{CvrpData, Solution};
use crate::savings::SavingsEntry;
use crate::solver::Deadline;

/// Replays `remaining` on a copy of `start`, merging each processable pair
/// with probability `acceptance`.
///
/// Only processable pairs consume a random draw.
///
/// # Panics
///
/// Panics if `acceptance` is outside `[0, 1]`.
pub fn simulate<'a, P, R>(
    start: &Solution<'a, P>,
    remaining: &[SavingsEntry],
    acceptance: f64,
    rng: &mut R,
) -> Solution<'a, P>
where
    P: CvrpData + ?Sized,
    R: Rng,
{
    let mut solution = start.clone();
    for entry in remaining {
        if solution.is_complete() {
            break;
        }
        let pair = entry.pair();
        if solution.can_process(pair) && rng.random_bool(acceptance) {
            solution.apply(pair);
        }
    }
    solution
}

/// Replaces `best` with `candidate` if the candidate is complete and
/// shorter. Returns `true` on replacement.
pub fn keep_best<'a, P: CvrpData + ?Sized>(
    best: &mut Option<Solution<'a, P>>,
    candidate: &Solution<'a, P>,
) -> bool {
    if !candidate.is_complete() {
        return false;
    }
    match best {
        Some(b) if b.length() <= candidate.length() => false,
        _ => {
            *best = Some(candidate.clone());
            true
        }
    }
}

/// Scores of one rollout index, plus its shortest complete replay.
struct Outcome<'a, P: CvrpData + ?Sized> {
    take: f64,
    skip: f64,
    best: Option<Solution<'a, P>>,
}

/// Aggregated scores of one decision point.
pub(crate) struct Tally<'a, P: CvrpData + ?Sized> {
    pub yes: f64,
    pub no: f64,
    pub runs: usize,
    pub best: Option<Solution<'a, P>>,
}

/// One rollout batch: the two starting states and what to replay.
pub(crate) struct Batch<'s, 'a, P: CvrpData + ?Sized> {
    pub take: &'s Solution<'a, P>,
    pub skip: &'s Solution<'a, P>,
    pub remaining: &'s [SavingsEntry],
    pub acceptance: f64,
}

impl<'a, P: CvrpData + ?Sized> Batch<'_, 'a, P> {
    fn run_one(&self, seed: u64) -> Outcome<'a, P> {
        let mut rng = StdRng::seed_from_u64(seed);
        let take = simulate(self.take, self.remaining, self.acceptance, &mut rng);
        let skip = simulate(self.skip, self.remaining, self.acceptance, &mut rng);

        let mut best = None;
        keep_best(&mut best, &take);
        keep_best(&mut best, &skip);
        Outcome {
            take: take.length(),
            skip: skip.length(),
            best,
        }
    }

    /// Runs one rollout per seed. Index 0 always runs; later indices are
    /// skipped once the deadline has passed. Only outcomes before the first
    /// skipped index are counted, reduced in seed order, so the result does
    /// not depend on `parallel` beyond where the deadline cut falls.
    pub fn run(&self, seeds: &[u64], deadline: &Deadline, parallel: bool) -> Tally<'a, P> {
        let task = |(r, &seed): (usize, &u64)| {
            (r == 0 || !deadline.expired()).then(|| self.run_one(seed))
        };
        let outcomes: Vec<Option<Outcome<'a, P>>> = if parallel {
            seeds.par_iter().enumerate().map(task).collect()
        } else {
            let mut outcomes = Vec::with_capacity(seeds.len());
            for item in seeds.iter().enumerate() {
                let outcome = task(item);
                let stop = outcome.is_none();
                outcomes.push(outcome);
                if stop {
                    break;
                }
            }
            outcomes
        };

        reduce(outcomes)
    }
}

/// Sums outcomes in index order, stopping at the first skipped index.
fn reduce<'a, P: CvrpData + ?Sized>(outcomes: Vec<Option<Outcome<'a, P>>>) -> Tally<'a, P> {
    let mut tally = Tally {
        yes: 0.0,
        no: 0.0,
        runs: 0,
        best: None,
    };
    for outcome in outcomes.into_iter().map_while(|o| o) {
        tally.yes += outcome.take;
        tally.no += outcome.skip;
        tally.runs += 1;
        if let Some(candidate) = outcome.best {
            keep_best(&mut tally.best, &candidate);
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, CvrpInstance, Route};
    use crate::savings::SavingsList;
    use std::time::Duration;

    fn instance() -> CvrpInstance {
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

    #[test]
    fn test_simulate_full_acceptance_is_greedy() {
        let inst = instance();
        let savings = SavingsList::from_data(&inst);
        let start = Solution::new(&inst, 2);
        let mut rng = StdRng::seed_from_u64(1);
        let end = simulate(&start, savings.entries(), 1.0, &mut rng);
        assert!(end.is_complete());
        assert_eq!(end.routes().next().map(Route::ids), Some(vec![1, 2, 3]));
        assert_eq!(start.allocated(), 0);
    }

    #[test]
    fn test_simulate_zero_acceptance_leaves_start() {
        let inst = instance();
        let savings = SavingsList::from_data(&inst);
        let (start, _) = Solution::new(&inst, 2).process((1, 2));
        let mut rng = StdRng::seed_from_u64(1);
        let end = simulate(&start, savings.entries(), 0.0, &mut rng);
        assert_eq!(end.allocated(), 2);
        assert_eq!(end.length(), start.length());
    }

    #[test]
    fn test_keep_best_only_complete_and_shorter() {
        let inst = instance();
        let mut best = None;
        let partial = Solution::new(&inst, 2).process((1, 2)).0;
        assert!(!keep_best(&mut best, &partial));
        assert!(best.is_none());

        let long = partial.process((3, 1)).0;
        assert!(long.is_complete());
        assert!(keep_best(&mut best, &long));

        let short = partial.process((2, 3)).0;
        assert!(short.length() < long.length());
        assert!(keep_best(&mut best, &short));
        assert!(!keep_best(&mut best, &long));
        assert_eq!(best.map(|b| b.length()), Some(short.length()));
    }

    #[test]
    fn test_batch_parallel_matches_sequential() {
        let inst = instance();
        let savings = SavingsList::from_data(&inst);
        let current = Solution::new(&inst, 2);
        let (processed, _) = current.process((1, 2));
        let batch = Batch {
            take: &processed,
            skip: &current,
            remaining: savings.after(0),
            acceptance: 0.5,
        };
        let seeds: Vec<u64> = (0..16).map(|s| s * 7919 + 3).collect();
        let deadline = Deadline::after(Duration::from_secs(60));

        let seq = batch.run(&seeds, &deadline, false);
        let par = batch.run(&seeds, &deadline, true);
        assert_eq!(seq.runs, 16);
        assert_eq!(par.runs, 16);
        assert_eq!(seq.yes, par.yes);
        assert_eq!(seq.no, par.no);
        assert_eq!(
            seq.best.map(|b| b.length()),
            par.best.map(|b| b.length())
        );
    }

    #[test]
    fn test_batch_expired_deadline_runs_one() {
        let inst = instance();
        let savings = SavingsList::from_data(&inst);
        let current = Solution::new(&inst, 2);
        let (processed, _) = current.process((1, 2));
        let batch = Batch {
            take: &processed,
            skip: &current,
            remaining: savings.after(0),
            acceptance: 1.0,
        };
        let deadline = Deadline::after(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));

        let tally = batch.run(&[1, 2, 3, 4], &deadline, false);
        assert_eq!(tally.runs, 1);
        let tally = batch.run(&[1, 2, 3, 4], &deadline, true);
        assert_eq!(tally.runs, 1);
    }

    #[test]
    fn test_reduce_stops_at_first_gap() {
        let outcome = |take: f64, skip: f64| {
            Some(Outcome::<CvrpInstance> {
                take,
                skip,
                best: None,
            })
        };
        let tally = reduce(vec![outcome(1.0, 2.0), None, outcome(10.0, 20.0)]);
        assert_eq!(tally.runs, 1);
        assert_eq!(tally.yes, 1.0);
        assert_eq!(tally.no, 2.0);

        let tally = reduce(vec![outcome(1.0, 2.0), outcome(3.0, 4.0)]);
        assert_eq!(tally.runs, 2);
        assert_eq!(tally.yes, 4.0);
        assert_eq!(tally.no, 6.0);
    }

    #[test]
    #[should_panic]
    fn test_simulate_rejects_out_of_range_acceptance() {
        let inst = instance();
        let savings = SavingsList::from_data(&inst);
        let start = Solution::new(&inst, 2);
        let mut rng = StdRng::seed_from_u64(1);
        simulate(&start, savings.entries(), 1.5, &mut rng);
    }
}
