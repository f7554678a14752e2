//! Sum of discrete uniform random variables
//!
//! For `Y = X_1 + ... + X_n` with each `X_i` uniform on `{0..k}`:
//! `P(Y = y) = poly_coeff(n, k, y) / (k + 1)^n`.

use num::{BigUint, ToPrimitive};

use super::distribution::Distribution;
use super::poly::PolyCoeffTable;
use crate::error::{Error, Result};

/// Largest `(k + 1)^n` (in bits) that still divides cleanly in `f64`
const MAX_DENOMINATOR_BITS: u64 = 1000;

/// Largest supported `n * k`.
///
/// The memo table grows roughly with `(n * k)^2`, so this admits a single
/// d1000 or 30d30 while rejecting pools that would exhaust memory.
pub const MAX_SUPPORT: u64 = 1000;

/// Distribution of the sum of `n` independent uniform variables on `{0..k}`.
///
/// Returns `n*k + 1` outcomes `0..=n*k`.
pub fn distr_sdurv(n: i64, k: i64) -> Result<Distribution> {
    if n < 1 {
        return Err(Error::InvalidArgument(format!("n must be >= 1, got {}", n)));
    }
    if k < 0 {
        return Err(Error::InvalidArgument(format!("k must be >= 0, got {}", k)));
    }
    let (n, k) = (n as u64, k as u64);

    let top = n
        .checked_mul(k)
        .filter(|top| *top <= MAX_SUPPORT)
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "{} variables on 0..={} exceed the supported range of {} outcomes",
                n,
                k,
                MAX_SUPPORT + 1
            ))
        })?;

    let exponent = u32::try_from(n)
        .map_err(|_| Error::InvalidArgument(format!("n = {} is too large", n)))?;
    let denominator = BigUint::from(k + 1).pow(exponent);
    if denominator.bits() > MAX_DENOMINATOR_BITS {
        return Err(Error::InvalidArgument(format!(
            "{} variables on 0..={} have too many combinations",
            n, k
        )));
    }
    let denominator = to_f64(&denominator)?;

    let mut table = PolyCoeffTable::new();
    let mut outcomes = Vec::with_capacity(top as usize + 1);
    let mut probabilities = Vec::with_capacity(top as usize + 1);
    for y in 0..=top as i64 {
        outcomes.push(y);
        probabilities.push(to_f64(&table.coeff(n, k, y))? / denominator);
    }

    Ok(Distribution::from_parts(outcomes, probabilities))
}

fn to_f64(value: &BigUint) -> Result<f64> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidArgument(format!("{} does not fit in f64", value)))
}
