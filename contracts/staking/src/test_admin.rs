extern crate std;

use common::Capability;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};

use crate::rewards::{MAX_BONUS_BPS, MAX_MULTIPLIER_BPS, MAX_REWARD_RATE};
use crate::{ContractError, StakingContract, StakingContractClient, Tier, TierRequirement, DAY, UNIT};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, StakingContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token, &10, &(100 * UNIT), &(7 * DAY));

    StellarAssetClient::new(&env, &token).mint(&admin, &(1_000_000 * UNIT));
    client.add_rewards(&admin, &(1_000_000 * UNIT));

    (env, client, admin, token)
}

fn staker(env: &Env, token: &Address, amount: i128) -> Address {
    let owner = Address::generate(env);
    StellarAssetClient::new(env, token).mint(&owner, &amount);
    owner
}

// ── Capabilities ─────────────────────────────────────────────────────────────

#[test]
fn test_admin_holds_both_capabilities_after_init() {
    let (_env, client, admin, _token) = setup();

    assert!(client.has_capability(&admin, &Capability::Admin));
    assert!(client.has_capability(&admin, &Capability::RewardsDistributor));
    assert_eq!(client.get_capabilities(&admin).len(), 2);
}

#[test]
fn test_grant_rewards_distributor() {
    let (env, client, admin, token) = setup();
    let treasury = staker(&env, &token, 5_000);

    let result = client.try_add_rewards(&treasury, &5_000);
    assert_eq!(
        result.unwrap_err().unwrap(),
        ContractError::NotRewardsDistributor
    );

    client.grant_capability(&admin, &treasury, &Capability::RewardsDistributor);
    assert!(client.has_capability(&treasury, &Capability::RewardsDistributor));
    assert!(!client.has_capability(&treasury, &Capability::Admin));

    let before = client.get_rewards_pool();
    client.add_rewards(&treasury, &5_000);
    assert_eq!(client.get_rewards_pool(), before + 5_000);
}

#[test]
fn test_non_admin_cannot_grant() {
    let (env, client, _admin, _token) = setup();
    let intruder = Address::generate(&env);

    let result = client.try_grant_capability(&intruder, &intruder, &Capability::Admin);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::NotAdmin);
    assert!(!client.has_capability(&intruder, &Capability::Admin));
}

#[test]
fn test_revoke_capability() {
    let (env, client, admin, _token) = setup();
    let second = Address::generate(&env);

    client.grant_capability(&admin, &second, &Capability::Admin);
    assert!(client.has_capability(&second, &Capability::Admin));

    // The second admin can act, then loses the right once revoked.
    client.set_reward_rate(&second, &20);
    assert_eq!(client.get_capability_holders().len(), 2);
    client.revoke_capability(&admin, &second, &Capability::Admin);
    assert_eq!(client.get_capability_holders().len(), 1);

    let result = client.try_set_reward_rate(&second, &30);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::NotAdmin);
    assert_eq!(client.get_reward_rate(), 20);
}

#[test]
fn test_admin_cannot_revoke_own_admin() {
    let (_env, client, admin, _token) = setup();

    let result = client.try_revoke_capability(&admin, &admin, &Capability::Admin);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidInput);
    assert!(client.has_capability(&admin, &Capability::Admin));

    // Dropping a different capability from oneself is fine.
    client.revoke_capability(&admin, &admin, &Capability::RewardsDistributor);
    assert!(!client.has_capability(&admin, &Capability::RewardsDistributor));
}

// ── Tier requirements ────────────────────────────────────────────────────────

#[test]
fn test_set_tier_requirement() {
    let (_env, client, admin, _token) = setup();

    let gold = TierRequirement {
        min_amount: 20_000 * UNIT,
        min_duration: 120 * DAY,
        reward_multiplier_bps: 16_000,
        governance_weight_bps: 22_000,
    };
    client.set_tier_requirement(&admin, &Tier::Gold, &gold);

    assert_eq!(client.get_tier_requirement(&Tier::Gold), gold);
    assert_eq!(client.classify(&(10_000 * UNIT), &(90 * DAY)), Tier::Silver);
    assert_eq!(client.classify(&(20_000 * UNIT), &(120 * DAY)), Tier::Gold);
}

#[test]
fn test_set_tier_requirement_validation() {
    let (env, client, admin, _token) = setup();
    let intruder = Address::generate(&env);
    let requirement = client.get_tier_requirement(&Tier::Silver);

    let result = client.try_set_tier_requirement(&intruder, &Tier::Silver, &requirement);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::NotAdmin);

    let negative = TierRequirement {
        min_amount: -1,
        ..requirement
    };
    let result = client.try_set_tier_requirement(&admin, &Tier::Silver, &negative);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidInput);
}

#[test]
fn test_existing_stakes_keep_their_tier() {
    let (env, client, admin, token) = setup();
    let owner = staker(&env, &token, 2_000 * UNIT);

    let old = client.create_stake(&owner, &(1_000 * UNIT), &(30 * DAY));
    assert_eq!(client.get_stake(&owner, &old).tier, Tier::Silver);

    let mut silver = client.get_tier_requirement(&Tier::Silver);
    silver.min_amount = 2_000 * UNIT;
    client.set_tier_requirement(&admin, &Tier::Silver, &silver);

    assert_eq!(client.get_stake(&owner, &old).tier, Tier::Silver);
    assert_eq!(client.classify(&(1_000 * UNIT), &(30 * DAY)), Tier::Basic);

    let new = client.create_stake(&owner, &(1_000 * UNIT), &(30 * DAY));
    assert_eq!(client.get_stake(&owner, &new).tier, Tier::Basic);

    // Time alone never moves the stored tier.
    env.ledger().set_timestamp(10 * DAY);
    assert_eq!(client.get_stake(&owner, &old).tier, Tier::Silver);
}

// ── Duration bonuses ─────────────────────────────────────────────────────────

#[test]
fn test_default_duration_bonuses() {
    let (_env, client, _admin, _token) = setup();

    assert_eq!(client.bonus_for(&(29 * DAY)), 0);
    assert_eq!(client.bonus_for(&(30 * DAY)), 500);
    assert_eq!(client.bonus_for(&(100 * DAY)), 1_000);
    assert_eq!(client.bonus_for(&(180 * DAY)), 2_500);
    assert_eq!(client.bonus_for(&(1_000 * DAY)), 5_000);
}

#[test]
fn test_set_and_remove_duration_bonus() {
    let (_env, client, admin, _token) = setup();

    client.set_duration_bonus(&admin, &(60 * DAY), &750);
    assert_eq!(client.bonus_for(&(60 * DAY)), 750);
    assert_eq!(client.get_duration_bonuses().len(), 5);

    // Same threshold replaces in place.
    client.set_duration_bonus(&admin, &(60 * DAY), &800);
    assert_eq!(client.bonus_for(&(89 * DAY)), 800);
    assert_eq!(client.get_duration_bonuses().len(), 5);

    let thresholds: std::vec::Vec<u64> = client
        .get_duration_bonuses()
        .iter()
        .map(|b| b.threshold)
        .collect();
    assert!(thresholds.windows(2).all(|w| w[0] < w[1]));

    client.remove_duration_bonus(&admin, &(60 * DAY));
    assert_eq!(client.bonus_for(&(60 * DAY)), 500);

    let result = client.try_remove_duration_bonus(&admin, &(60 * DAY));
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidInput);
}

#[test]
fn test_duration_bonus_requires_admin() {
    let (env, client, _admin, _token) = setup();
    let intruder = Address::generate(&env);

    let result = client.try_set_duration_bonus(&intruder, &DAY, &10_000);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::NotAdmin);
    assert_eq!(client.bonus_for(&DAY), 0);
}

// ── Reward rate and minimums ─────────────────────────────────────────────────

#[test]
fn test_reward_rate_applies_to_unsettled_time() {
    let (env, client, admin, token) = setup();
    let owner = staker(&env, &token, 100 * UNIT);

    let id = client.create_stake(&owner, &(100 * UNIT), &(7 * DAY));

    env.ledger().set_timestamp(100);
    assert_eq!(client.pending_rewards(&owner, &id), 1_000);

    client.set_reward_rate(&admin, &20);
    assert_eq!(client.get_reward_rate(), 20);
    assert_eq!(client.pending_rewards(&owner, &id), 2_000);

    client.set_reward_rate(&admin, &0);
    env.ledger().set_timestamp(500);
    assert_eq!(client.pending_rewards(&owner, &id), 0);

    let result = client.try_set_reward_rate(&admin, &-1);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidInput);
}

#[test]
fn test_reward_rate_above_cap_is_rejected() {
    let (_env, client, admin, _token) = setup();

    let result = client.try_set_reward_rate(&admin, &(i128::MAX / 1_000_000));
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidInput);
    let result = client.try_set_reward_rate(&admin, &(MAX_REWARD_RATE + 1));
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidInput);
    assert_eq!(client.get_reward_rate(), 10);

    client.set_reward_rate(&admin, &MAX_REWARD_RATE);
    assert_eq!(client.get_reward_rate(), MAX_REWARD_RATE);
}

#[test]
fn test_initialize_rejects_rate_above_cap() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    let token = Address::generate(&env);

    let result = client.try_initialize(&admin, &token, &(MAX_REWARD_RATE + 1), &UNIT, &DAY);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidInput);
    assert!(!client.is_initialized());
}

#[test]
fn test_matured_stake_exits_at_maximum_rate() {
    let (env, client, admin, token) = setup();
    let owner = staker(&env, &token, 100 * UNIT);

    let id = client.create_stake(&owner, &(100 * UNIT), &(7 * DAY));
    client.set_reward_rate(&admin, &MAX_REWARD_RATE);

    env.ledger().set_timestamp(7 * DAY);
    let reward = client.pending_rewards(&owner, &id);
    assert_eq!(reward, MAX_REWARD_RATE * (7 * DAY) as i128);

    // Top the pool up to cover the whole reward, then leave.
    StellarAssetClient::new(&env, &token).mint(&admin, &reward);
    client.add_rewards(&admin, &reward);

    assert_eq!(client.unstake(&owner, &id), 100 * UNIT + reward);
    assert!(!client.get_stake(&owner, &id).active);
    assert_eq!(client.get_total_staked(), 0);
}

#[test]
fn test_multiplier_and_bonus_caps() {
    let (_env, client, admin, _token) = setup();

    let mut gold = client.get_tier_requirement(&Tier::Gold);
    gold.reward_multiplier_bps = MAX_MULTIPLIER_BPS + 1;
    let result = client.try_set_tier_requirement(&admin, &Tier::Gold, &gold);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidInput);

    gold.reward_multiplier_bps = MAX_MULTIPLIER_BPS;
    client.set_tier_requirement(&admin, &Tier::Gold, &gold);

    let result = client.try_set_duration_bonus(&admin, &(60 * DAY), &(MAX_BONUS_BPS + 1));
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidInput);
    client.set_duration_bonus(&admin, &(60 * DAY), &MAX_BONUS_BPS);
    assert_eq!(client.bonus_for(&(60 * DAY)), MAX_BONUS_BPS);
}

#[test]
fn test_set_min_stake() {
    let (env, client, admin, token) = setup();
    let owner = staker(&env, &token, 1_000 * UNIT);

    client.set_min_stake(&admin, &(500 * UNIT), &(14 * DAY));
    assert_eq!(client.get_min_stake_amount(), 500 * UNIT);
    assert_eq!(client.get_min_stake_duration(), 14 * DAY);

    let result = client.try_create_stake(&owner, &(100 * UNIT), &(14 * DAY));
    assert_eq!(result.unwrap_err().unwrap(), ContractError::AmountBelowMinimum);
    let result = client.try_create_stake(&owner, &(500 * UNIT), &(7 * DAY));
    assert_eq!(result.unwrap_err().unwrap(), ContractError::DurationBelowMinimum);

    client.create_stake(&owner, &(500 * UNIT), &(14 * DAY));

    let result = client.try_set_min_stake(&admin, &0, &DAY);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidInput);
}
