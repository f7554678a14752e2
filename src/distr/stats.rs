//! Summary statistics for damage distributions

use serde::Serialize;

use super::distribution::Distribution;
use crate::error::{Error, Result};

/// Expected value and tail quantiles of a distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Probability-weighted mean
    pub mean: f64,
    /// Standard deviation
    pub std_dev: f64,
    /// Damage dealt at least 70% of the time
    pub min_70: i64,
    /// Damage dealt at least 90% of the time
    pub min_90: i64,
    /// Damage not exceeded 70% of the time
    pub max_70: i64,
    /// Damage not exceeded 90% of the time
    pub max_90: i64,
}

/// Summarize a distribution.
///
/// `min_p` is the smallest outcome whose cumulative probability reaches
/// `1 - p`; `max_p` is the smallest whose cumulative probability reaches `p`.
pub fn get_stats(dist: &Distribution) -> Result<Summary> {
    let quantile = |p: f64| {
        dist.quantile(p).ok_or_else(|| {
            Error::InvalidArgument("cannot summarize an empty distribution".to_string())
        })
    };

    Ok(Summary {
        mean: dist.mean(),
        std_dev: dist.std_dev(),
        min_70: quantile(1.0 - 0.7)?,
        min_90: quantile(1.0 - 0.9)?,
        max_70: quantile(0.7)?,
        max_90: quantile(0.9)?,
    })
}
