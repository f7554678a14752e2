//! Damage reports
//!
//! Bundles an attack with its distribution and summary statistics, and
//! renders the result as text or JSON.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::OutputFormat;
use crate::distr::{get_stats, Attack, Distribution, Summary};
use crate::error::Result;

/// Computed damage report for one attack
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub attack: Attack,
    pub summary: Summary,
    pub distribution: Distribution,
}

impl Report {
    /// Compute the distribution and statistics for an attack
    pub fn new(attack: Attack) -> Result<Self> {
        let distribution = attack.distribution()?;
        let summary = get_stats(&distribution)?;
        debug!(
            "{} outcomes for {}, mean {:.3}",
            distribution.len(),
            attack.dice,
            summary.mean
        );

        Ok(Self {
            attack,
            summary,
            distribution,
        })
    }

    /// Render in the requested format
    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.attack;
        let s = &self.summary;

        writeln!(f, "Dice roll:       {}", a.dice)?;
        writeln!(f, "Modifier:        {:+}", a.modifier)?;
        writeln!(f, "Hit chance:      {}", a.hit_chance)?;
        writeln!(f, "Half damage:     {}", if a.half_damage { "yes" } else { "no" })?;
        writeln!(f)?;
        writeln!(f, "Expected damage: {:.2} (std dev {:.2})", s.mean, s.std_dev)?;
        writeln!(f, "70% of the time: {} to {}", s.min_70, s.max_70)?;
        writeln!(f, "90% of the time: at least {}, at most {}", s.min_90, s.max_90)?;
        writeln!(f)?;
        writeln!(f, "{:>7}  {:>11}", "damage", "probability")?;
        for (outcome, p) in self.distribution.iter() {
            writeln!(f, "{:>7}  {:>11.6}", outcome, p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distr::DiceRoll;

    fn report(half_damage: bool) -> Report {
        let attack = Attack::new(DiceRoll::new(2, 6).unwrap(), 1, 0.8, half_damage).unwrap();
        Report::new(attack).unwrap()
    }

    #[test]
    fn test_text_render() {
        let text = report(false).render(OutputFormat::Text).unwrap();
        assert!(text.contains("Dice roll:       2d6"));
        assert!(text.contains("Modifier:        +1"));
        assert!(text.contains("Half damage:     no"));
        // Miss row plus 3..=13
        let rows = text.lines().skip_while(|l| !l.contains("probability")).skip(1).count();
        assert_eq!(rows, 12);
    }

    #[test]
    fn test_json_render() {
        let json = report(true).render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["attack"]["dice"], "2d6");
        assert_eq!(value["attack"]["half_damage"], true);
        let outcomes = value["distribution"]["outcomes"].as_array().unwrap();
        let probabilities = value["distribution"]["probabilities"].as_array().unwrap();
        assert_eq!(outcomes.len(), probabilities.len());
        assert_eq!(outcomes[0], 1);
        assert_eq!(outcomes[outcomes.len() - 1], 13);
    }

    #[test]
    fn test_summary_matches_distribution() {
        let r = report(false);
        assert!((r.summary.mean - r.distribution.mean()).abs() < 1e-12);
        assert!((r.summary.mean - 0.8 * 8.0).abs() < 1e-10);
    }
}
