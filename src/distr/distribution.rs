//! Discrete distributions over integer outcomes

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};

/// Tolerance used when comparing cumulative probabilities
pub const CUMULATIVE_TOLERANCE: f64 = 1e-9;

/// Upper bound on the outcomes a gap-filled mixture may span
pub const MAX_OUTCOMES: i128 = 1 << 20;

/// Probability distribution over strictly increasing integer outcomes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    outcomes: Vec<i64>,
    probabilities: Vec<f64>,
}

impl Distribution {
    /// Create a distribution, checking that the two sequences line up and
    /// that outcomes are strictly increasing.
    pub fn new(outcomes: Vec<i64>, probabilities: Vec<f64>) -> Result<Self> {
        if outcomes.len() != probabilities.len() {
            return Err(Error::InvalidArgument(format!(
                "{} outcomes but {} probabilities",
                outcomes.len(),
                probabilities.len()
            )));
        }
        if let Some(w) = outcomes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(Error::InvalidArgument(format!(
                "outcomes must be strictly increasing ({} then {})",
                w[0], w[1]
            )));
        }
        if let Some(p) = probabilities.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(Error::InvalidArgument(format!("invalid probability {}", p)));
        }
        Ok(Self { outcomes, probabilities })
    }

    /// All mass on a single outcome
    pub fn point(outcome: i64) -> Self {
        Self {
            outcomes: vec![outcome],
            probabilities: vec![1.0],
        }
    }

    /// Build from already-validated parts
    pub(crate) fn from_parts(outcomes: Vec<i64>, probabilities: Vec<f64>) -> Self {
        debug_assert_eq!(outcomes.len(), probabilities.len());
        debug_assert!(outcomes.windows(2).all(|w| w[0] < w[1]));
        Self { outcomes, probabilities }
    }

    /// Weighted mixture of several distributions.
    ///
    /// Mass landing on the same outcome is summed. With `fill_gaps`, the
    /// result covers every integer between the smallest and largest outcome,
    /// using zero probability where no branch contributes; spans wider than
    /// [`MAX_OUTCOMES`] are rejected.
    pub(crate) fn mixture(branches: &[(f64, &Distribution)], fill_gaps: bool) -> Result<Self> {
        let mut mass: BTreeMap<i64, f64> = BTreeMap::new();
        for (weight, dist) in branches {
            for (outcome, p) in dist.iter() {
                *mass.entry(outcome).or_insert(0.0) += weight * p;
            }
        }

        if fill_gaps {
            if let (Some(&lo), Some(&hi)) = (mass.keys().next(), mass.keys().next_back()) {
                let span = hi as i128 - lo as i128 + 1;
                if span > MAX_OUTCOMES {
                    return Err(Error::InvalidArgument(format!(
                        "outcomes {}..={} span more than {} values",
                        lo, hi, MAX_OUTCOMES
                    )));
                }
                for outcome in lo..=hi {
                    mass.entry(outcome).or_insert(0.0);
                }
            }
        }

        let (outcomes, probabilities) = mass.into_iter().unzip();
        Ok(Self::from_parts(outcomes, probabilities))
    }

    /// Outcome values, strictly increasing
    pub fn outcomes(&self) -> &[i64] {
        &self.outcomes
    }

    /// Probabilities aligned with [`Self::outcomes`]
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Iterate over `(outcome, probability)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.outcomes.iter().copied().zip(self.probabilities.iter().copied())
    }

    /// Smallest outcome
    pub fn min(&self) -> Option<i64> {
        self.outcomes.first().copied()
    }

    /// Largest outcome
    pub fn max(&self) -> Option<i64> {
        self.outcomes.last().copied()
    }

    /// Probability of a single outcome, zero if it is not in the support
    pub fn probability(&self, outcome: i64) -> f64 {
        self.outcomes
            .binary_search(&outcome)
            .map(|i| self.probabilities[i])
            .unwrap_or(0.0)
    }

    /// Sum of all probabilities
    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Whether the probabilities sum to one within `tolerance`
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.total() - 1.0).abs() < tolerance
    }

    /// Add `offset` to every outcome, failing if any outcome overflows
    pub fn shift(&self, offset: i64) -> Result<Self> {
        let outcomes = self
            .outcomes
            .iter()
            .map(|o| o.checked_add(offset))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                Error::InvalidArgument(format!("shifting outcomes by {} overflows", offset))
            })?;

        Ok(Self {
            outcomes,
            probabilities: self.probabilities.clone(),
        })
    }

    /// Whether the outcomes form an unbroken run of integers
    pub fn is_contiguous(&self) -> bool {
        self.outcomes.windows(2).all(|w| w[1] - w[0] == 1)
    }

    /// Probability-weighted mean
    pub fn mean(&self) -> f64 {
        self.iter().map(|(o, p)| o as f64 * p).sum()
    }

    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        self.iter().map(|(o, p)| p * (o as f64 - mean).powi(2)).sum()
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Smallest outcome whose cumulative probability reaches `p`.
    ///
    /// Falls back to the largest outcome when rounding keeps the running
    /// total just under `p`. Returns `None` only for an empty distribution.
    pub fn quantile(&self, p: f64) -> Option<i64> {
        let mut cumulative = 0.0;
        for (outcome, prob) in self.iter() {
            cumulative += prob;
            if cumulative >= p - CUMULATIVE_TOLERANCE {
                return Some(outcome);
            }
        }
        self.max()
    }
}
