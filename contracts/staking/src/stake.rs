use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::tiers::Tier;
use crate::ContractError;

// Per-owner persistent storage uses tuple keys:  (prefix, owner[, stake_id])
const STAKE: Symbol = symbol_short!("STAKE");
const STAKE_CTR: Symbol = symbol_short!("STK_CTR");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// A single locked position, identified by `(owner, id)`.
///
/// `tier` reflects the classification at the last create/increase/extend and
/// is not touched by the passage of time. Unstaked records stay in storage
/// with `active = false`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stake {
    pub id: u64,
    pub owner: Address,
    pub amount: i128,
    /// Committed duration used for tier and bonus lookup.
    pub nominal_duration: u64,
    pub start_time: u64,
    /// Lock maturity.
    pub end_time: u64,
    /// Accrual baseline: last claim, or last settlement by increase/extend.
    pub last_claim_time: u64,
    /// Rewards settled at a reclassification but not yet paid out.
    pub banked_rewards: i128,
    /// Point at which governance decay restarts from 1.0 (creation or last extension).
    pub decay_start: u64,
    pub tier: Tier,
    pub active: bool,
}

fn stake_key(owner: &Address, id: u64) -> (Symbol, Address, u64) {
    (STAKE, owner.clone(), id)
}

fn counter_key(owner: &Address) -> (Symbol, Address) {
    (STAKE_CTR, owner.clone())
}

/// Number of stakes ever created by `owner`; ids run `1..=count`.
pub fn count(env: &Env, owner: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&counter_key(owner))
        .unwrap_or(0)
}

pub fn next_id(env: &Env, owner: &Address) -> u64 {
    let key = counter_key(owner);
    let next = count(env, owner).saturating_add(1);
    env.storage().persistent().set(&key, &next);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    next
}

pub fn store(env: &Env, stake: &Stake) {
    let key = stake_key(&stake.owner, stake.id);
    env.storage().persistent().set(&key, stake);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn load(env: &Env, owner: &Address, id: u64) -> Option<Stake> {
    env.storage().persistent().get(&stake_key(owner, id))
}

/// Loads a stake for mutation.
///
/// A missing record, a record under another owner and an unstaked record
/// are all reported as `StakeNotActive`.
pub fn load_active(env: &Env, owner: &Address, id: u64) -> Result<Stake, ContractError> {
    match load(env, owner, id) {
        Some(stake) if stake.active => Ok(stake),
        _ => Err(ContractError::StakeNotActive),
    }
}
