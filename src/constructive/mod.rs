//! Constructive heuristics for building VRP solutions.
//!
//! - [`ClarkeWrightSolver`] — Clarke-Wright savings with endpoint-only
//!   merges (1964), O(n² log n)

mod clarke_wright;

pub use clarke_wright::ClarkeWrightSolver;
