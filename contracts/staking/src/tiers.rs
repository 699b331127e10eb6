//! Tier table and the tier classifier.
//!
//! Classification is a pure function of `(amount, nominal_duration)` and the
//! tier table in force when a stake is created, increased or extended. The
//! tier stored on a stake is never recomputed just because time passes or the
//! table changes afterwards.

use soroban_sdk::contracttype;

/// Fixed-point scale for multipliers and factors: `10_000` = 1.0x.
pub const BPS: u32 = 10_000;

/// One whole token in smallest units (7 decimals).
pub const UNIT: i128 = 10_000_000;

pub const DAY: u64 = 86_400;

/// Staking class, ordered `Basic < Silver < Gold < Platinum < Validator < NodeOperator`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Tier {
    Basic = 0,
    Silver = 1,
    Gold = 2,
    Platinum = 3,
    Validator = 4,
    NodeOperator = 5,
}

impl Tier {
    /// Every tier, lowest first.
    pub const ALL: [Tier; 6] = [
        Tier::Basic,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Validator,
        Tier::NodeOperator,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Entry requirements and weighting for a single tier.
///
/// Both minimums must hold at the same time for a stake to qualify.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierRequirement {
    pub min_amount: i128,
    pub min_duration: u64,
    /// Reward multiplier in basis points.
    pub reward_multiplier_bps: u32,
    /// Governance weight factor in basis points.
    pub governance_weight_bps: u32,
}

impl TierRequirement {
    pub fn is_met(&self, amount: i128, duration: u64) -> bool {
        amount >= self.min_amount && duration >= self.min_duration
    }
}

/// The full requirement table, indexed by [`Tier::index`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierTable {
    requirements: [TierRequirement; 6],
}

impl TierTable {
    pub fn new(requirements: [TierRequirement; 6]) -> Self {
        Self { requirements }
    }

    /// Table seeded at initialization. `Basic` mirrors the global staking
    /// minimums so every admissible stake lands at least there.
    pub fn with_defaults(min_amount: i128, min_duration: u64) -> Self {
        let req = |amount, days: u64, reward, governance| TierRequirement {
            min_amount: amount,
            min_duration: days * DAY,
            reward_multiplier_bps: reward,
            governance_weight_bps: governance,
        };

        Self::new([
            TierRequirement {
                min_amount,
                min_duration,
                reward_multiplier_bps: BPS,
                governance_weight_bps: BPS,
            },
            req(1_000 * UNIT, 30, 12_500, 15_000),
            req(10_000 * UNIT, 90, 15_000, 20_000),
            req(50_000 * UNIT, 180, 20_000, 30_000),
            req(100_000 * UNIT, 365, 25_000, 50_000),
            req(500_000 * UNIT, 730, 30_000, 60_000),
        ])
    }

    pub fn requirement(&self, tier: Tier) -> &TierRequirement {
        &self.requirements[tier.index()]
    }

    /// Highest tier whose amount *and* duration minimums are both satisfied.
    ///
    /// Falls back to [`Tier::Basic`] when nothing qualifies, which can only
    /// happen if an admin raised `Basic` above the global staking minimums.
    pub fn classify(&self, amount: i128, duration: u64) -> Tier {
        Tier::ALL
            .iter()
            .rev()
            .copied()
            .find(|tier| self.requirement(*tier).is_met(amount, duration))
            .unwrap_or(Tier::Basic)
    }
}
