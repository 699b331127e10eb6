use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const CAPS_PREFIX: Symbol = symbol_short!("CAPS");
const HOLDERS: Symbol = symbol_short!("CAP_HLDR");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Capability Enum ──────────────────────────────────────────────────────────

/// Capabilities that can be granted to an identity.
///
/// - `Admin`              – Global configuration, pausing, capability grants
///                          and emergency withdrawal.
/// - `RewardsDistributor` – May top up the rewards pool.
///
/// Capabilities are independent: holding `Admin` does not imply
/// `RewardsDistributor`, each must be granted explicitly.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Capability {
    Admin = 1,
    RewardsDistributor = 2,
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn caps_key(who: &Address) -> (Symbol, Address) {
    (CAPS_PREFIX, who.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Returns every capability currently granted to `who`.
pub fn capabilities_of(env: &Env, who: &Address) -> Vec<Capability> {
    let key = caps_key(who);
    let caps: Option<Vec<Capability>> = env.storage().persistent().get(&key);
    match caps {
        Some(caps) => {
            extend_ttl(env, &key);
            caps
        }
        None => Vec::new(env),
    }
}

pub fn has_capability(env: &Env, who: &Address, capability: Capability) -> bool {
    capabilities_of(env, who).contains(capability)
}

/// Grants `capability` to `who`.
/// Callers must verify authorization beforehand.
///
/// Returns `false` if `who` already held the capability.
pub fn grant(env: &Env, who: &Address, capability: Capability) -> bool {
    let mut caps = capabilities_of(env, who);
    if caps.contains(capability) {
        return false;
    }
    caps.push_back(capability);

    let key = caps_key(who);
    env.storage().persistent().set(&key, &caps);
    extend_ttl(env, &key);
    track_holder(env, who);
    true
}

/// Revokes `capability` from `who`.
///
/// Returns `false` if `who` did not hold the capability.
pub fn revoke(env: &Env, who: &Address, capability: Capability) -> bool {
    let caps = capabilities_of(env, who);
    let Some(index) = caps.first_index_of(capability) else {
        return false;
    };

    let mut remaining = caps;
    remaining.remove(index);

    let key = caps_key(who);
    if remaining.is_empty() {
        env.storage().persistent().remove(&key);
        untrack_holder(env, who);
    } else {
        env.storage().persistent().set(&key, &remaining);
        extend_ttl(env, &key);
    }
    true
}

// ── Holder Registry ──────────────────────────────────────────────────────────

/// Returns all addresses holding at least one capability.
pub fn list_holders(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&HOLDERS)
        .unwrap_or(Vec::new(env))
}

fn track_holder(env: &Env, who: &Address) {
    let mut holders = list_holders(env);
    if !holders.contains(who) {
        holders.push_back(who.clone());
        env.storage().persistent().set(&HOLDERS, &holders);
    }
}

fn untrack_holder(env: &Env, who: &Address) {
    let mut holders = list_holders(env);
    if let Some(index) = holders.first_index_of(who) {
        holders.remove(index);
        env.storage().persistent().set(&HOLDERS, &holders);
    }
}
