//! Polynomial coefficient engine
//!
//! Computes the coefficient of `x^q` in `(1 + x + ... + x^k)^n`, which counts
//! the ways `n` values drawn from `{0..k}` can sum to `q`.
//!
//! Ref: Caiado & Rathie, "Polynomial coefficients and distribution of the sum
//! of discrete uniform variables" (2007).

use std::collections::HashMap;

use num::{BigUint, One, Zero};

use crate::error::{Error, Result};

/// Compute a single polynomial coefficient.
///
/// Fails with [`Error::InvalidArgument`] if `n < 0` or `k < 0`. Any `q`
/// outside `0..=n*k` is a structural zero, not an error.
pub fn poly_coeff(n: i64, k: i64, q: i64) -> Result<BigUint> {
    let n = non_negative("n", n)?;
    let k = non_negative("k", k)?;
    Ok(PolyCoeffTable::new().coeff(n, k, q))
}

/// Memo table for polynomial coefficients keyed by `(n, k, q)`.
///
/// Sub-results are reused across calls on the same table, so computing a
/// whole distribution costs little more than its largest coefficient.
#[derive(Debug, Default)]
pub struct PolyCoeffTable {
    memo: HashMap<(u64, u64, u64), BigUint>,
}

impl PolyCoeffTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of memoized entries
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    /// Whether nothing has been memoized yet
    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    /// Coefficient of `x^q` in `(1 + x + ... + x^k)^n`.
    ///
    /// Sub-problems are resolved from an explicit work stack, so the depth
    /// in `k` is bounded by heap memory rather than the thread stack.
    pub fn coeff(&mut self, n: u64, k: u64, q: i64) -> BigUint {
        if q < 0 {
            return BigUint::zero();
        }
        let q = q as u64;
        if self.is_settled(n, k, q) {
            return self.value(n, k, q);
        }

        let mut stack = vec![(n, k, q)];
        while let Some(&(n, k, q)) = stack.last() {
            if self.memo.contains_key(&(n, k, q)) {
                stack.pop();
                continue;
            }

            let mut pending = false;
            for (m, p) in terms(n, k, q) {
                if !self.is_settled(m, k - 1, p) {
                    stack.push((m, k - 1, p));
                    pending = true;
                }
            }
            if pending {
                continue;
            }

            let total = terms(n, k, q).fold(BigUint::zero(), |acc, (m, p)| {
                let inner = self.value(m, k - 1, p);
                if inner.is_zero() {
                    acc
                } else {
                    acc + binomial(n, m) * inner
                }
            });
            self.memo.insert((n, k, q), total);
            stack.pop();
        }

        self.value(n, k, q)
    }

    /// Whether a sub-problem is a base case or already memoized
    fn is_settled(&self, n: u64, k: u64, q: u64) -> bool {
        q > n.saturating_mul(k) || k == 0 || self.memo.contains_key(&(n, k, q))
    }

    /// Value of a settled sub-problem
    fn value(&self, n: u64, k: u64, q: u64) -> BigUint {
        if q > n.saturating_mul(k) {
            return BigUint::zero();
        }
        if k == 0 {
            // q == 0 here, every term is the constant 1
            return BigUint::one();
        }
        self.memo.get(&(n, k, q)).cloned().unwrap_or_default()
    }
}

/// Sub-problems `(q - p, p)` of `(n, k, q)` over the `(1 + ... + x^(k-1))` layer.
///
/// Terms with p above q*(k-1)/k vanish in the sub-coefficient, and
/// C(n, q-p) vanishes for p below q-n. Requires `k >= 1`.
fn terms(n: u64, k: u64, q: u64) -> impl Iterator<Item = (u64, u64)> {
    let limit = (q as u128 * (k - 1) as u128 / k as u128) as u64;
    (q.saturating_sub(n)..=limit).map(move |p| (q - p, p))
}

/// Binomial coefficient `C(n, r)`, zero when `r > n`.
pub fn binomial(n: u64, r: u64) -> BigUint {
    if r > n {
        return BigUint::zero();
    }
    let r = r.min(n - r);
    let mut acc = BigUint::one();
    for i in 0..r {
        // Exact: a product of i+1 consecutive integers is divisible by (i+1)!
        acc = acc * BigUint::from(n - i) / BigUint::from(i + 1);
    }
    acc
}

fn non_negative(name: &str, value: i64) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| Error::InvalidArgument(format!("{} must be >= 0, got {}", name, value)))
}
