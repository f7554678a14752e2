//! Damage distributions
//!
//! Turns dice notation into damage distributions with:
//! - A flat modifier on every hit
//! - A chance to miss entirely (zero damage)
//! - Half damage (rounded down) when the target saves

use serde::Serialize;

use super::dice::DiceRoll;
use super::distribution::Distribution;
use crate::error::{Error, Result};

/// Damage distribution of `dice` plus `modifier`, assuming the attack lands.
pub fn dmg_distr(dice: &str, modifier: i64) -> Result<Distribution> {
    let roll: DiceRoll = dice.parse()?;
    roll.distribution(modifier)
}

/// Distribution of `floor(outcome / 2)` for a full-damage distribution.
///
/// The input must be a dice-sum distribution: a contiguous run of integer
/// outcomes, as produced by [`dmg_distr`] with a zero modifier. Each halved
/// value then collects the one or two adjacent outcomes that round down to
/// it. Anything with gaps is rejected rather than folded.
pub fn half_distr(full: &Distribution) -> Result<Distribution> {
    let (lo, hi) = match (full.min(), full.max()) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => {
            return Err(Error::InvalidArgument(
                "cannot halve an empty distribution".to_string(),
            ))
        }
    };
    if !full.is_contiguous() {
        return Err(Error::InvalidArgument(
            "half damage needs contiguous dice-sum outcomes".to_string(),
        ));
    }

    let bottom = lo.div_euclid(2);
    let top = hi.div_euclid(2);
    let mut probabilities = vec![0.0; (top - bottom + 1) as usize];
    for (outcome, p) in full.iter() {
        probabilities[(outcome.div_euclid(2) - bottom) as usize] += p;
    }

    Ok(Distribution::from_parts((bottom..=top).collect(), probabilities))
}

/// Damage distribution once hit chance and half damage are accounted for.
pub fn adjusted_distr(
    dice: &str,
    modifier: i64,
    hit_chance: f64,
    half_damage: bool,
) -> Result<Distribution> {
    let roll: DiceRoll = dice.parse()?;
    Attack::new(roll, modifier, hit_chance, half_damage)?.distribution()
}

/// A damaging attack or spell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Attack {
    /// Damage dice
    pub dice: DiceRoll,
    /// Flat bonus added to a full hit
    pub modifier: i64,
    /// Probability the attack lands (or the target fails its save)
    pub hit_chance: f64,
    /// Whether a miss (successful save) still deals half damage
    pub half_damage: bool,
}

impl Attack {
    /// Create an attack, rejecting hit chances outside `[0, 1]`
    pub fn new(dice: DiceRoll, modifier: i64, hit_chance: f64, half_damage: bool) -> Result<Self> {
        let attack = Self {
            dice,
            modifier,
            hit_chance,
            half_damage,
        };
        attack.validate()?;
        Ok(attack)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.hit_chance) {
            return Err(Error::InvalidArgument(format!(
                "hit chance must be in [0, 1], got {}",
                self.hit_chance
            )));
        }
        Ok(())
    }

    /// Full mixture over hit and miss (or save) outcomes.
    ///
    /// Without half damage, a miss is a zero-damage outcome. With half
    /// damage, the halved unmodified roll and the full roll share one
    /// contiguous outcome axis and add up where they overlap.
    pub fn distribution(&self) -> Result<Distribution> {
        self.validate()?;
        let hit = self.hit_chance;
        let full = self.dice.distribution(self.modifier)?;

        if self.half_damage {
            let half = half_distr(&self.dice.distribution(0)?)?;
            Distribution::mixture(&[(1.0 - hit, &half), (hit, &full)], true)
        } else {
            let miss = Distribution::point(0);
            Distribution::mixture(&[(1.0 - hit, &miss), (hit, &full)], false)
        }
    }
}
