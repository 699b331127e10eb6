#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Governance weight properties.
//!
//! Invariants tested:
//! - Weight never exceeds `amount × factor`
//! - Weight never increases as time passes
//! - Weight is zero from maturity on

use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};
use staking::{governance::weight, Stake, Tier, BPS, DAY, UNIT};

fn stake(env: &Env, amount: i128, duration: u64) -> Stake {
    Stake {
        id: 1,
        owner: Address::generate(env),
        amount,
        nominal_duration: duration,
        start_time: 0,
        end_time: duration,
        last_claim_time: 0,
        banked_rewards: 0,
        decay_start: 0,
        tier: Tier::Basic,
        active: true,
    }
}

proptest! {
    #[test]
    fn prop_weight_bounded_by_full_weight(
        units in 1i64..=1_000_000,
        days in 7u64..=1_000,
        factor in BPS..=60_000u32,
        at in 0u64..=1_000 * DAY,
    ) {
        let env = Env::default();
        let amount = units as i128 * UNIT;
        let s = stake(&env, amount, days * DAY);

        let w = weight(&s, factor, at).unwrap();
        prop_assert!(w >= 0);
        prop_assert!(w <= amount * factor as i128 / BPS as i128);
    }

    #[test]
    fn prop_weight_non_increasing(
        units in 1i64..=1_000_000,
        days in 7u64..=1_000,
        factor in BPS..=60_000u32,
        t1 in 0u64..=1_000 * DAY,
        t2 in 0u64..=1_000 * DAY,
    ) {
        let env = Env::default();
        let s = stake(&env, units as i128 * UNIT, days * DAY);
        let (early, late) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

        prop_assert!(weight(&s, factor, early).unwrap() >= weight(&s, factor, late).unwrap());
    }

    #[test]
    fn prop_weight_zero_after_maturity(
        units in 1i64..=1_000_000,
        days in 7u64..=1_000,
        past in 0u64..=1_000 * DAY,
    ) {
        let env = Env::default();
        let s = stake(&env, units as i128 * UNIT, days * DAY);
        prop_assert_eq!(weight(&s, BPS, s.end_time + past).unwrap(), 0);
    }
}
