//! dicedist - exact damage distributions for dice-based attacks
//!
//! Computes exact probability distributions for sums of dice, then folds in
//! flat modifiers, hit chance, and half damage on a successful save.

pub mod config;
pub mod distr;
pub mod error;
pub mod report;

pub use config::{Config, ConfigError, OutputFormat};
pub use distr::{
    adjusted_distr, distr_sdurv, dmg_distr, get_stats, half_distr, poly_coeff, Attack, DiceRoll,
    Distribution, Summary,
};
pub use error::{Error, Result};
pub use report::Report;
