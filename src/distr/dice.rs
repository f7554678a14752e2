//! Dice notation
//!
//! Parses notation like "3d10" into a typed dice specification.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use super::distribution::Distribution;
use super::sdurv::distr_sdurv;
use crate::error::{Error, Result};

static DICE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]+)d([0-9]+)$").unwrap());

/// A parsed dice specification: `count` dice with faces `1..=sides`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceRoll {
    /// Number of dice to roll
    pub count: u32,
    /// Number of sides per die
    pub sides: u32,
}

impl DiceRoll {
    /// Create a dice specification, rejecting zero dice or zero sides
    pub fn new(count: u32, sides: u32) -> Result<Self> {
        if count == 0 {
            return Err(Error::InvalidArgument("dice count must be at least 1".to_string()));
        }
        if sides == 0 {
            return Err(Error::InvalidArgument("die sides must be at least 1".to_string()));
        }
        Ok(Self { count, sides })
    }

    /// Get the minimum possible result
    pub fn min(&self) -> i64 {
        self.count as i64
    }

    /// Get the maximum possible result
    pub fn max(&self) -> i64 {
        self.count as i64 * self.sides as i64
    }

    /// Expected total of the roll
    pub fn average(&self) -> f64 {
        self.count as f64 * (1.0 + self.sides as f64) / 2.0
    }

    /// Distribution of the roll total plus a flat modifier.
    ///
    /// Each die is uniform on `0..sides-1` shifted up by one, so the
    /// builder's `0..=count*(sides-1)` range moves by `count + modifier`.
    /// Outcomes are not clamped and may be negative, but must fit in `i64`.
    pub fn distribution(&self, modifier: i64) -> Result<Distribution> {
        let base = distr_sdurv(self.count as i64, self.sides as i64 - 1)?;
        let offset = (self.count as i64).checked_add(modifier).ok_or_else(|| {
            Error::InvalidArgument(format!("modifier {} overflows {}", modifier, self))
        })?;
        base.shift(offset)
    }
}

impl FromStr for DiceRoll {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_dice(s)
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

impl Serialize for DiceRoll {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a dice notation string like "3d10"
pub fn parse_dice(notation: &str) -> Result<DiceRoll> {
    let notation = notation.trim().to_lowercase();

    let caps = DICE_REGEX
        .captures(&notation)
        .ok_or_else(|| Error::Parse(format!("expected <count>d<sides>, got {:?}", notation)))?;

    let count: u32 = caps[1]
        .parse()
        .map_err(|_| Error::Parse(format!("invalid dice count: {}", &caps[1])))?;
    let sides: u32 = caps[2]
        .parse()
        .map_err(|_| Error::Parse(format!("invalid die sides: {}", &caps[2])))?;

    DiceRoll::new(count, sides).map_err(|e| match e {
        Error::InvalidArgument(msg) => Error::Parse(msg),
        other => other,
    })
}
