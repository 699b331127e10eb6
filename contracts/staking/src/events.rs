#![allow(deprecated)] // events().publish migration tracked separately

use common::Capability;
use soroban_sdk::{symbol_short, Address, Env};

use crate::config::PauseScope;
use crate::roles::Role;
use crate::tiers::{Tier, TierRequirement};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub reward_rate: i128,
    pub min_stake_amount: i128,
    pub min_stake_duration: u64,
    pub timestamp: u64,
}

/// Fired when a new stake is opened.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeCreatedEvent {
    pub owner: Address,
    pub stake_id: u64,
    pub amount: i128,
    pub duration: u64,
    pub tier: Tier,
    pub end_time: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeIncreasedEvent {
    pub owner: Address,
    pub stake_id: u64,
    pub added: i128,
    pub new_amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeExtendedEvent {
    pub owner: Address,
    pub stake_id: u64,
    pub added: u64,
    pub new_end_time: u64,
    pub timestamp: u64,
}

/// Fired when a mutation moves a stake to a different tier.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierChangedEvent {
    pub owner: Address,
    pub stake_id: u64,
    pub old_tier: Tier,
    pub new_tier: Tier,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimedEvent {
    pub owner: Address,
    pub stake_id: u64,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub owner: Address,
    pub stake_id: u64,
    pub principal: i128,
    pub reward: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsAddedEvent {
    pub distributor: Address,
    pub amount: i128,
    pub new_pool_balance: i128,
    pub timestamp: u64,
}

/// Fired when an owner gains or loses the validator / node-operator role.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub owner: Address,
    pub role: Role,
    pub role_count: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierRequirementSetEvent {
    pub tier: Tier,
    pub requirement: TierRequirement,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DurationBonusSetEvent {
    pub threshold: u64,
    pub bonus_bps: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateSetEvent {
    pub new_rate: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinStakeSetEvent {
    pub min_amount: i128,
    pub min_duration: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub caller: Address,
    pub scope: PauseScope,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawalEvent {
    pub caller: Address,
    pub recipient: Address,
    pub amount: i128,
    pub from_rewards_pool: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapabilityChangedEvent {
    pub caller: Address,
    pub target: Address,
    pub capability: Capability,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    token: Address,
    reward_rate: i128,
    min_stake_amount: i128,
    min_stake_duration: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            reward_rate,
            min_stake_amount,
            min_stake_duration,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_created(
    env: &Env,
    owner: Address,
    stake_id: u64,
    amount: i128,
    duration: u64,
    tier: Tier,
    end_time: u64,
) {
    env.events().publish(
        (symbol_short!("STAKED"), owner.clone()),
        StakeCreatedEvent {
            owner,
            stake_id,
            amount,
            duration,
            tier,
            end_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_increased(
    env: &Env,
    owner: Address,
    stake_id: u64,
    added: i128,
    new_amount: i128,
) {
    env.events().publish(
        (symbol_short!("INCREASED"), owner.clone()),
        StakeIncreasedEvent {
            owner,
            stake_id,
            added,
            new_amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_extended(
    env: &Env,
    owner: Address,
    stake_id: u64,
    added: u64,
    new_end_time: u64,
) {
    env.events().publish(
        (symbol_short!("EXTENDED"), owner.clone()),
        StakeExtendedEvent {
            owner,
            stake_id,
            added,
            new_end_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tier_changed(
    env: &Env,
    owner: Address,
    stake_id: u64,
    old_tier: Tier,
    new_tier: Tier,
) {
    env.events().publish(
        (symbol_short!("TIER_CHG"), owner.clone()),
        TierChangedEvent {
            owner,
            stake_id,
            old_tier,
            new_tier,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_claimed(env: &Env, owner: Address, stake_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), owner.clone()),
        RewardsClaimedEvent {
            owner,
            stake_id,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(env: &Env, owner: Address, stake_id: u64, principal: i128, reward: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), owner.clone()),
        UnstakedEvent {
            owner,
            stake_id,
            principal,
            reward,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_added(env: &Env, distributor: Address, amount: i128, new_pool_balance: i128) {
    env.events().publish(
        (symbol_short!("RWD_ADD"), distributor.clone()),
        RewardsAddedEvent {
            distributor,
            amount,
            new_pool_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_granted(env: &Env, owner: Address, role: Role, role_count: u32) {
    env.events().publish(
        (symbol_short!("ROLE_ON"), owner.clone()),
        RoleChangedEvent {
            owner,
            role,
            role_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_revoked(env: &Env, owner: Address, role: Role, role_count: u32) {
    env.events().publish(
        (symbol_short!("ROLE_OFF"), owner.clone()),
        RoleChangedEvent {
            owner,
            role,
            role_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tier_requirement_set(env: &Env, tier: Tier, requirement: TierRequirement) {
    env.events().publish(
        (symbol_short!("TIER_SET"),),
        TierRequirementSetEvent {
            tier,
            requirement,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_duration_bonus_set(env: &Env, threshold: u64, bonus_bps: u32) {
    env.events().publish(
        (symbol_short!("BONUS_SET"),),
        DurationBonusSetEvent {
            threshold,
            bonus_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_duration_bonus_removed(env: &Env, threshold: u64) {
    env.events().publish(
        (symbol_short!("BONUS_DEL"),),
        (threshold, env.ledger().timestamp()),
    );
}

pub fn publish_reward_rate_set(env: &Env, new_rate: i128) {
    env.events().publish(
        (symbol_short!("RWD_RATE"),),
        RewardRateSetEvent {
            new_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_min_stake_set(env: &Env, min_amount: i128, min_duration: u64) {
    env.events().publish(
        (symbol_short!("MIN_SET"),),
        MinStakeSetEvent {
            min_amount,
            min_duration,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_paused(env: &Env, caller: Address, scope: PauseScope) {
    env.events().publish(
        (symbol_short!("PAUSED"), caller.clone()),
        PauseChangedEvent {
            caller,
            scope,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unpaused(env: &Env, caller: Address, scope: PauseScope) {
    env.events().publish(
        (symbol_short!("UNPAUSED"), caller.clone()),
        PauseChangedEvent {
            caller,
            scope,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdrawal(
    env: &Env,
    caller: Address,
    recipient: Address,
    amount: i128,
    from_rewards_pool: i128,
) {
    env.events().publish(
        (symbol_short!("EMRG_WD"), caller.clone()),
        EmergencyWithdrawalEvent {
            caller,
            recipient,
            amount,
            from_rewards_pool,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_capability_granted(
    env: &Env,
    caller: Address,
    target: Address,
    capability: Capability,
) {
    env.events().publish(
        (symbol_short!("CAP_GRNT"), target.clone()),
        CapabilityChangedEvent {
            caller,
            target,
            capability,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_capability_revoked(
    env: &Env,
    caller: Address,
    target: Address,
    capability: Capability,
) {
    env.events().publish(
        (symbol_short!("CAP_RVKD"), target.clone()),
        CapabilityChangedEvent {
            caller,
            target,
            capability,
            timestamp: env.ledger().timestamp(),
        },
    );
}
