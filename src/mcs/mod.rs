//! Binary Monte Carlo savings (BinaryMCS-CWS).
//!
//! - [`BinaryMcsSolver`] — savings sweep with a rollout vote per merge
//! - [`McsConfig`] / [`DecisionRule`] — rollout count, acceptance
//!   probability, comparison rule
//! - [`simulate`] — one randomized completion of a savings list

mod config;
mod rollout;
mod solver;

pub use config::{DecisionRule, McsConfig, DEFAULT_ACCEPTANCE, DEFAULT_ROLLOUTS};
pub use rollout::{keep_best, simulate};
pub use solver::BinaryMcsSolver;
