//! Exact damage distributions
//!
//! Layered, each part built only on the ones before it:
//! - Polynomial coefficients of `(1 + x + ... + x^k)^n`
//! - Distributions of sums of discrete uniform variables
//! - Dice notation ("3d10")
//! - Damage transforms: flat modifier, hit chance, half damage on save
//! - Summary statistics (mean and tail quantiles)
//!
//! Every function here is pure and performs no logging.

mod damage;
mod dice;
mod distribution;
mod poly;
mod sdurv;
mod stats;

pub use damage::{adjusted_distr, dmg_distr, half_distr, Attack};
pub use dice::{parse_dice, DiceRoll};
pub use distribution::{Distribution, CUMULATIVE_TOLERANCE};
pub use poly::{binomial, poly_coeff, PolyCoeffTable};
pub use sdurv::distr_sdurv;
pub use stats::{get_stats, Summary};
