//! End-to-end checks of the distribution API

use dicedist::distr::binomial;
use dicedist::{
    adjusted_distr, distr_sdurv, dmg_distr, get_stats, half_distr, poly_coeff, Attack, DiceRoll,
    Error, Report,
};
use num::BigUint;

const TOL: f64 = 1e-10;

#[test]
fn test_sdurv_grid_is_normalized() {
    for n in 1..=10 {
        for k in 0..=10 {
            let d = distr_sdurv(n, k).expect("valid inputs");
            assert_eq!(d.len() as i64, k * n + 1);
            assert!((d.total() - 1.0).abs() < TOL, "n={} k={}", n, k);
            assert!(d.outcomes().windows(2).all(|w| w[1] == w[0] + 1));
        }
    }
}

#[test]
fn test_poly_coeff_binomial_specialization() {
    for n in 1..=10i64 {
        for q in 0..=n {
            assert_eq!(poly_coeff(n, 1, q).unwrap(), binomial(n as u64, q as u64));
        }
    }
}

#[test]
fn test_poly_coeff_structural_zero() {
    for n in 0..=6i64 {
        for k in 0..=6i64 {
            assert_eq!(poly_coeff(n, k, -1).unwrap(), BigUint::from(0u32));
            assert_eq!(poly_coeff(n, k, n * k + 1).unwrap(), BigUint::from(0u32));
        }
    }
}

#[test]
fn test_poly_coeff_rejects_negative() {
    assert!(matches!(poly_coeff(-1, 1, 1), Err(Error::InvalidArgument(_))));
    assert!(matches!(poly_coeff(1, -1, 1), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_dmg_distr_3d10_plus_4() {
    let d = dmg_distr("3d10", 4).unwrap();
    assert_eq!(d.min(), Some(7));
    assert_eq!(d.max(), Some(34));
    assert!((d.total() - 1.0).abs() < TOL);
}

#[test]
fn test_half_distr_3d8() {
    let half = half_distr(&dmg_distr("3d8", 0).unwrap()).unwrap();
    assert_eq!(half.min(), Some(1));
    assert_eq!(half.max(), Some(12));
    assert!(half.outcomes().windows(2).all(|w| w[0] < w[1]));
    assert!((half.total() - 1.0).abs() < TOL);
    assert!(half.probabilities().iter().all(|p| (0.0..=1.0).contains(p)));
}

#[test]
fn test_adjusted_2d10_half_damage() {
    let d = adjusted_distr("2d10", 0, 0.75, true).unwrap();
    assert_eq!(d.min(), Some(1));
    assert_eq!(d.max(), Some(20));
    assert_eq!(d.outcomes(), (1..=20).collect::<Vec<i64>>().as_slice());
    assert!((d.total() - 1.0).abs() < TOL);
}

#[test]
fn test_adjusted_4d6_plus_3_with_misses() {
    let d = adjusted_distr("4d6", 3, 0.9, false).unwrap();
    assert_eq!(d.min(), Some(0));
    assert_eq!(d.max(), Some(27));
    assert!((d.probability(0) - 0.1).abs() < TOL);
    let hits: f64 = d.iter().filter(|(o, _)| *o != 0).map(|(_, p)| p).sum();
    assert!((hits - 0.9).abs() < TOL);
    assert!((d.total() - 1.0).abs() < TOL);
}

#[test]
fn test_repeat_runs_are_identical() {
    let cases = [("3d10", 4, 1.0, false), ("3d8", 0, 0.5, true), ("4d6", 3, 0.9, false)];
    for (dice, modifier, hit, half) in cases {
        let a = adjusted_distr(dice, modifier, hit, half).unwrap();
        let b = adjusted_distr(dice, modifier, hit, half).unwrap();
        assert_eq!(a.outcomes(), b.outcomes());
        assert_eq!(a.probabilities(), b.probabilities());
    }
}

#[test]
fn test_malformed_dice() {
    for bad in ["3d", "d10", "3x10", "three d10", "3d10+2"] {
        assert!(matches!(dmg_distr(bad, 0), Err(Error::Parse(_))), "{}", bad);
    }
}

#[test]
fn test_independent_queries_in_parallel() {
    let handles: Vec<_> = (1..=4)
        .map(|n| std::thread::spawn(move || adjusted_distr(&format!("{}d8", n), 1, 0.6, true)))
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let d = handle.join().unwrap().unwrap();
        let serial = adjusted_distr(&format!("{}d8", i + 1), 1, 0.6, true).unwrap();
        assert_eq!(d, serial);
    }
}

#[test]
fn test_report_for_fireball() {
    // 8d6, half on a save, 40% chance the target fails
    let attack = Attack::new(DiceRoll::new(8, 6).unwrap(), 0, 0.4, true).unwrap();
    let report = Report::new(attack).unwrap();
    let stats = get_stats(&report.distribution).unwrap();
    assert_eq!(report.summary, stats);

    // Saved half is 8*3.5/2 on average, ignoring the floor
    let expected_full = 0.4 * 28.0;
    assert!(report.summary.mean > expected_full + 0.6 * 13.0);
    assert!(report.summary.mean < expected_full + 0.6 * 14.0);
}
