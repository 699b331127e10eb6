#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Reward accrual properties.
//!
//! Invariants tested:
//! - Accrual never decreases with elapsed time, multiplier or bonus
//! - Splitting a period into two claims never pays more than one claim

use proptest::prelude::*;
use staking::{rewards::accrued, BPS};

proptest! {
    #[test]
    fn prop_accrual_monotone_in_time(
        rate in 0i128..=1_000_000,
        t1 in 0u64..=100_000_000,
        t2 in 0u64..=100_000_000,
        mult in BPS..=30_000u32,
        bonus in 0u32..=5_000,
    ) {
        let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        prop_assert!(accrued(rate, lo, mult, bonus).unwrap() <= accrued(rate, hi, mult, bonus).unwrap());
    }

    #[test]
    fn prop_accrual_monotone_in_multiplier_and_bonus(
        rate in 0i128..=1_000_000,
        elapsed in 0u64..=100_000_000,
        mult in BPS..=30_000u32,
        extra_mult in 0u32..=10_000,
        bonus in 0u32..=5_000,
        extra_bonus in 0u32..=5_000,
    ) {
        let base = accrued(rate, elapsed, mult, bonus).unwrap();
        prop_assert!(base <= accrued(rate, elapsed, mult + extra_mult, bonus).unwrap());
        prop_assert!(base <= accrued(rate, elapsed, mult, bonus + extra_bonus).unwrap());
    }

    #[test]
    fn prop_split_claims_never_overpay(
        rate in 0i128..=1_000_000,
        first in 0u64..=50_000_000,
        second in 0u64..=50_000_000,
        mult in BPS..=30_000u32,
        bonus in 0u32..=5_000,
    ) {
        let split = accrued(rate, first, mult, bonus).unwrap()
            + accrued(rate, second, mult, bonus).unwrap();
        let whole = accrued(rate, first + second, mult, bonus).unwrap();
        prop_assert!(split <= whole);
        // Each split truncates by less than one unit.
        prop_assert!(whole - split <= 1);
    }
}
