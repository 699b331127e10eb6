//! Validator / node-operator role bookkeeping.
//!
//! The global counters track active *stakes* at the role tier. An owner holds
//! the role while at least one of their active stakes sits at that tier; the
//! per-owner count drives grant and revoke. Counters only move when a stake is
//! created, reclassified by its own mutation, or unstaked.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::events;
use crate::tiers::Tier;

const VALIDATOR_COUNT: Symbol = symbol_short!("VAL_CNT");
const NODE_OPERATOR_COUNT: Symbol = symbol_short!("NODE_CNT");
const ROLE_STAKES: Symbol = symbol_short!("ROLE_STK");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Validator = 1,
    NodeOperator = 2,
}

pub fn role_for(tier: Tier) -> Option<Role> {
    match tier {
        Tier::Validator => Some(Role::Validator),
        Tier::NodeOperator => Some(Role::NodeOperator),
        _ => None,
    }
}

fn counter_key(role: Role) -> Symbol {
    match role {
        Role::Validator => VALIDATOR_COUNT,
        Role::NodeOperator => NODE_OPERATOR_COUNT,
    }
}

fn owner_key(owner: &Address, role: Role) -> (Symbol, Address, Role) {
    (ROLE_STAKES, owner.clone(), role)
}

/// Active stakes currently classified at `role`'s tier, across all owners.
pub fn count(env: &Env, role: Role) -> u32 {
    env.storage()
        .instance()
        .get(&counter_key(role))
        .unwrap_or(0)
}

/// Active stakes `owner` holds at `role`'s tier.
pub fn owner_stakes(env: &Env, owner: &Address, role: Role) -> u32 {
    env.storage()
        .persistent()
        .get(&owner_key(owner, role))
        .unwrap_or(0)
}

pub fn holds(env: &Env, owner: &Address, role: Role) -> bool {
    owner_stakes(env, owner, role) > 0
}

fn set_owner_stakes(env: &Env, owner: &Address, role: Role, value: u32) {
    let key = owner_key(owner, role);
    if value == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &value);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

fn enter(env: &Env, owner: &Address, role: Role) {
    let total = count(env, role).saturating_add(1);
    env.storage().instance().set(&counter_key(role), &total);

    let held = owner_stakes(env, owner, role);
    set_owner_stakes(env, owner, role, held.saturating_add(1));
    if held == 0 {
        events::publish_role_granted(env, owner.clone(), role, total);
    }
}

fn leave(env: &Env, owner: &Address, role: Role) {
    let total = count(env, role).saturating_sub(1);
    env.storage().instance().set(&counter_key(role), &total);

    let held = owner_stakes(env, owner, role).saturating_sub(1);
    set_owner_stakes(env, owner, role, held);
    if held == 0 {
        events::publish_role_revoked(env, owner.clone(), role, total);
    }
}

/// A stake of `owner` moved from `from` to `to`. `None` means the stake was
/// not (or is no longer) active.
pub fn on_transition(env: &Env, owner: &Address, from: Option<Tier>, to: Option<Tier>) {
    if from == to {
        return;
    }
    if let Some(role) = from.and_then(role_for) {
        leave(env, owner, role);
    }
    if let Some(role) = to.and_then(role_for) {
        enter(env, owner, role);
    }
}
