//! Duration bonus schedule.
//!
//! The schedule is kept sorted by ascending threshold. A stake receives the
//! bonus of the greatest threshold not exceeding its nominal duration.

use soroban_sdk::{contracttype, Env, Vec};

use crate::tiers::DAY;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DurationBonus {
    pub threshold: u64,
    /// Additive bonus in basis points (`500` = +5 %).
    pub bonus_bps: u32,
}

pub fn default_schedule(env: &Env) -> Vec<DurationBonus> {
    let mut schedule = Vec::new(env);
    for (days, bonus_bps) in [(30u64, 500u32), (90, 1_000), (180, 2_500), (365, 5_000)] {
        schedule.push_back(DurationBonus {
            threshold: days * DAY,
            bonus_bps,
        });
    }
    schedule
}

/// Bonus for a nominal duration, `0` when no threshold qualifies.
pub fn bonus_for(schedule: &Vec<DurationBonus>, duration: u64) -> u32 {
    let mut best: Option<DurationBonus> = None;
    for entry in schedule.iter() {
        if entry.threshold > duration {
            continue;
        }
        match &best {
            Some(b) if b.threshold >= entry.threshold => {}
            _ => best = Some(entry),
        }
    }
    best.map(|b| b.bonus_bps).unwrap_or(0)
}

/// Inserts `entry`, replacing any entry with the same threshold.
pub fn upsert(schedule: &mut Vec<DurationBonus>, entry: DurationBonus) {
    let mut i = 0;
    while i < schedule.len() {
        let Some(existing) = schedule.get(i) else {
            break;
        };
        if existing.threshold == entry.threshold {
            schedule.set(i, entry);
            return;
        }
        if existing.threshold > entry.threshold {
            schedule.insert(i, entry);
            return;
        }
        i += 1;
    }
    schedule.push_back(entry);
}

/// Removes the entry at `threshold`. Returns `false` if there was none.
pub fn remove(schedule: &mut Vec<DurationBonus>, threshold: u64) -> bool {
    for i in 0..schedule.len() {
        if schedule.get(i).map(|e| e.threshold) == Some(threshold) {
            schedule.remove(i);
            return true;
        }
    }
    false
}
