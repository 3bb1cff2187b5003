//! Binary Monte Carlo savings parameters.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Default number of rollouts per hypothesis.
pub const DEFAULT_ROLLOUTS: usize = 50;

/// Default probability that a rollout accepts a processable pair.
pub const DEFAULT_ACCEPTANCE: f64 = 0.9;

/// How aggregated rollout scores decide whether a merge is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    /// Take the merge when `yes <= no`.
    #[default]
    NonStrict,
    /// Take the merge only when `yes < no`.
    Strict,
}

impl DecisionRule {
    /// Returns `true` if the "take" total `yes` beats the "skip" total `no`.
    pub fn adopt(self, yes: f64, no: f64) -> bool {
        match self {
            DecisionRule::NonStrict => yes <= no,
            DecisionRule::Strict => yes < no,
        }
    }
}

/// Configuration for [`BinaryMcsSolver`](super::BinaryMcsSolver).
///
/// Missing fields take their defaults when deserialized.
///
/// # Examples
///
/// ```
/// use u_savings::mcs::{DecisionRule, McsConfig};
///
/// let config = McsConfig::default()
///     .with_rollouts(20)
///     .with_acceptance(0.6)
///     .with_decision(DecisionRule::Strict);
/// assert!(config.validate().is_ok());
/// assert!(McsConfig::default().with_acceptance(1.5).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McsConfig {
    /// Rollouts per hypothesis at every decision point.
    pub rollouts: usize,
    /// Probability that a rollout merges a processable pair.
    pub acceptance: f64,
    /// Comparison between the "take" and "skip" totals.
    pub decision: DecisionRule,
    /// Run each rollout batch on the rayon pool.
    pub parallel: bool,
}

impl Default for McsConfig {
    fn default() -> Self {
        Self {
            rollouts: DEFAULT_ROLLOUTS,
            acceptance: DEFAULT_ACCEPTANCE,
            decision: DecisionRule::NonStrict,
            parallel: false,
        }
    }
}

impl McsConfig {
    /// Earlier variant: acceptance 0.6 with a strict comparison.
    pub fn legacy() -> Self {
        Self {
            acceptance: 0.6,
            decision: DecisionRule::Strict,
            ..Self::default()
        }
    }

    /// Sets the number of rollouts per hypothesis.
    pub fn with_rollouts(mut self, rollouts: usize) -> Self {
        self.rollouts = rollouts;
        self
    }

    /// Sets the acceptance probability.
    pub fn with_acceptance(mut self, acceptance: f64) -> Self {
        self.acceptance = acceptance;
        self
    }

    /// Sets the decision rule.
    pub fn with_decision(mut self, decision: DecisionRule) -> Self {
        self.decision = decision;
        self
    }

    /// Enables or disables parallel rollout batches.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that the parameters are usable.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.rollouts > 0, "rollouts must be positive");
        ensure!(
            (0.0..=1.0).contains(&self.acceptance),
            "acceptance must lie in [0, 1], got {}",
            self.acceptance
        );
        Ok(())
    }
}
