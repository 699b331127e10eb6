//! Global parameters, running totals and the circuit breaker.
//!
//! Everything here lives in instance storage and is written only by
//! `initialize`, admin entry points, or the registry's own bookkeeping.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::bonus::DurationBonus;
use crate::tiers::{Tier, TierRequirement, TierTable};
use crate::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");
const REWARD_RATE: Symbol = symbol_short!("RWD_RATE");
const MIN_AMOUNT: Symbol = symbol_short!("MIN_AMT");
const MIN_DURATION: Symbol = symbol_short!("MIN_DUR");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const REWARDS_POOL: Symbol = symbol_short!("RWD_POOL");
const TIER_REQ: Symbol = symbol_short!("TIER_REQ");
const BONUSES: Symbol = symbol_short!("BONUSES");
const GLOBAL_PAUSE: Symbol = symbol_short!("P_GLOB");
const FUNCTION_PAUSE: Symbol = symbol_short!("P_FUNC");

// Operation tags used for function-scoped pausing.
pub const OP_CREATE: Symbol = symbol_short!("CREATE");
pub const OP_INCREASE: Symbol = symbol_short!("INCREASE");
pub const OP_EXTEND: Symbol = symbol_short!("EXTEND");
pub const OP_CLAIM: Symbol = symbol_short!("CLAIM");
pub const OP_UNSTAKE: Symbol = symbol_short!("UNSTAKE");
pub const OP_ADD_REWARDS: Symbol = symbol_short!("ADD_RWD");

// ── Lifecycle ────────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if !is_initialized(env) {
        return Err(ContractError::NotInitialized);
    }
    Ok(())
}

pub fn mark_initialized(env: &Env, token: &Address) {
    env.storage().instance().set(&INITIALIZED, &true);
    env.storage().instance().set(&TOKEN, token);
}

pub fn token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&TOKEN)
        .ok_or(ContractError::NotInitialized)
}

// ── Parameters ───────────────────────────────────────────────────────────────

pub fn reward_rate(env: &Env) -> i128 {
    env.storage().instance().get(&REWARD_RATE).unwrap_or(0)
}

pub fn set_reward_rate(env: &Env, rate: i128) {
    env.storage().instance().set(&REWARD_RATE, &rate);
}

pub fn min_stake_amount(env: &Env) -> i128 {
    env.storage().instance().get(&MIN_AMOUNT).unwrap_or(0)
}

pub fn min_stake_duration(env: &Env) -> u64 {
    env.storage().instance().get(&MIN_DURATION).unwrap_or(0)
}

pub fn set_min_stake(env: &Env, amount: i128, duration: u64) {
    env.storage().instance().set(&MIN_AMOUNT, &amount);
    env.storage().instance().set(&MIN_DURATION, &duration);
}

pub fn tier_requirement(env: &Env, tier: Tier) -> Result<TierRequirement, ContractError> {
    env.storage()
        .instance()
        .get(&(TIER_REQ, tier))
        .ok_or(ContractError::NotInitialized)
}

pub fn set_tier_requirement(env: &Env, tier: Tier, requirement: &TierRequirement) {
    env.storage().instance().set(&(TIER_REQ, tier), requirement);
}

pub fn tier_table(env: &Env) -> Result<TierTable, ContractError> {
    Ok(TierTable::new([
        tier_requirement(env, Tier::Basic)?,
        tier_requirement(env, Tier::Silver)?,
        tier_requirement(env, Tier::Gold)?,
        tier_requirement(env, Tier::Platinum)?,
        tier_requirement(env, Tier::Validator)?,
        tier_requirement(env, Tier::NodeOperator)?,
    ]))
}

pub fn store_tier_table(env: &Env, table: &TierTable) {
    for tier in Tier::ALL {
        set_tier_requirement(env, tier, table.requirement(tier));
    }
}

pub fn bonus_schedule(env: &Env) -> Vec<DurationBonus> {
    env.storage()
        .instance()
        .get(&BONUSES)
        .unwrap_or(Vec::new(env))
}

pub fn set_bonus_schedule(env: &Env, schedule: &Vec<DurationBonus>) {
    env.storage().instance().set(&BONUSES, schedule);
}

// ── Running totals ───────────────────────────────────────────────────────────

/// Principal backing active stakes.
pub fn total_staked(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
}

pub fn set_total_staked(env: &Env, value: i128) {
    env.storage().instance().set(&TOTAL_STAKED, &value);
}

/// Tokens reserved for reward payouts. Disjoint from principal.
pub fn rewards_pool(env: &Env) -> i128 {
    env.storage().instance().get(&REWARDS_POOL).unwrap_or(0)
}

pub fn set_rewards_pool(env: &Env, value: i128) {
    env.storage().instance().set(&REWARDS_POOL, &value);
}

/// How much of an emergency withdrawal of `amount` must come out of the
/// rewards pool, given the contract's token `balance`.
///
/// Principal is never withdrawable. Unreserved surplus is consumed first,
/// the pool only for the remainder.
pub fn emergency_pool_share(
    balance: i128,
    total_staked: i128,
    pool: i128,
    amount: i128,
) -> Result<i128, ContractError> {
    let withdrawable = balance.saturating_sub(total_staked);
    if amount > withdrawable {
        return Err(ContractError::CannotWithdrawStakedPrincipal);
    }
    let surplus = withdrawable.saturating_sub(pool).max(0);
    Ok(amount.saturating_sub(surplus).clamp(0, pool))
}

// ── Circuit breaker ──────────────────────────────────────────────────────────

/// Defines the scope of the pause mechanism
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PauseScope {
    /// Halts every operation that opens or grows a position
    Global,
    /// Halts a single operation, identified by its tag
    Function(Symbol),
}

fn function_pause_key(op: &Symbol) -> (Symbol, Symbol) {
    (FUNCTION_PAUSE, op.clone())
}

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&GLOBAL_PAUSE).unwrap_or(false)
}

pub fn is_function_paused(env: &Env, op: &Symbol) -> bool {
    env.storage()
        .instance()
        .get(&function_pause_key(op))
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, scope: &PauseScope, paused: bool) {
    match scope {
        PauseScope::Global => env.storage().instance().set(&GLOBAL_PAUSE, &paused),
        PauseScope::Function(op) => env
            .storage()
            .instance()
            .set(&function_pause_key(op), &paused),
    }
}

/// Guard for operations that open or grow a position: honors the global flag
/// and the operation's own flag.
pub fn require_not_paused(env: &Env, op: &Symbol) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    require_function_open(env, op)
}

/// Guard for exits and pool top-ups: only the operation's own flag applies,
/// so a global pause never traps funds.
pub fn require_function_open(env: &Env, op: &Symbol) -> Result<(), ContractError> {
    if is_function_paused(env, op) {
        return Err(ContractError::Paused);
    }
    Ok(())
}
