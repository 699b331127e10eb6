//! Time-decaying governance weight.
//!
//! Weight is recomputed on demand from `(stake, now)`; nothing is stored.
//! It starts at `amount × factor` when the stake is created or extended and
//! falls linearly to zero at maturity.

use crate::stake::Stake;
use crate::tiers::BPS;

/// `amount × factor × (end − now) / (end − decay_start)`; `None` on overflow.
pub fn weight(stake: &Stake, factor_bps: u32, now: u64) -> Option<i128> {
    if !stake.active || now >= stake.end_time {
        return Some(0);
    }
    let window = stake.end_time.saturating_sub(stake.decay_start);
    if window == 0 {
        return Some(0);
    }
    let remaining = stake.end_time - now.max(stake.decay_start);

    stake
        .amount
        .checked_mul(factor_bps as i128)?
        .checked_mul(remaining as i128)?
        .checked_div((BPS as i128).checked_mul(window as i128)?)
}
