//! Reward accrual.
//!
//! A stake earns linearly from its last claim:
//!
//! ```text
//! accrued = rate × elapsed × multiplier × (1 + bonus)
//! ```
//!
//! with `multiplier` and `bonus` in basis points. Everything is multiplied out
//! first and divided once at the end, so truncation happens exactly once.
//! Claiming moves the baseline forward; nothing compounds. Increasing or
//! extending a stake banks what was earned under the old classification and
//! moves the baseline too, so a tier change never reprices past time.

use crate::stake::Stake;
use crate::tiers::{TierRequirement, BPS};

/// Largest admissible tier reward multiplier (10x).
pub const MAX_MULTIPLIER_BPS: u32 = 100_000;

/// Largest admissible duration bonus (+1000 %).
pub const MAX_BONUS_BPS: u32 = 100_000;

/// Largest admissible reward rate. At or below it, `accrued` cannot overflow
/// for any `u64` elapsed time under the multiplier and bonus caps, so
/// settlement never blocks an exit.
pub const MAX_REWARD_RATE: i128 = i128::MAX
    / (u64::MAX as i128
        * MAX_MULTIPLIER_BPS as i128
        * (BPS as i128 + MAX_BONUS_BPS as i128));

/// `None` on `i128` overflow.
pub fn accrued(rate: i128, elapsed: u64, multiplier_bps: u32, bonus_bps: u32) -> Option<i128> {
    let bps = BPS as i128;
    rate.checked_mul(elapsed as i128)?
        .checked_mul(multiplier_bps as i128)?
        .checked_mul(bps.checked_add(bonus_bps as i128)?)?
        .checked_div(bps.checked_mul(bps)?)
}

/// Rewards owed to `stake` at `now`: anything banked plus accrual since the
/// baseline. Inactive stakes are owed nothing.
pub fn pending(
    stake: &Stake,
    requirement: &TierRequirement,
    bonus_bps: u32,
    rate: i128,
    now: u64,
) -> Option<i128> {
    if !stake.active {
        return Some(0);
    }
    let elapsed = now.saturating_sub(stake.last_claim_time);
    stake
        .banked_rewards
        .checked_add(accrued(rate, elapsed, requirement.reward_multiplier_bps, bonus_bps)?)
}
