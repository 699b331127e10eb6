#![no_std]

pub mod bonus;
pub mod config;
pub mod events;
pub mod governance;
pub mod rewards;
pub mod roles;
pub mod stake;
pub mod tiers;

use common::access::{self, Capability};
use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol, Vec};

use config::{OP_ADD_REWARDS, OP_CLAIM, OP_CREATE, OP_EXTEND, OP_INCREASE, OP_UNSTAKE};

pub use bonus::DurationBonus;
pub use config::PauseScope;
pub use roles::Role;
pub use stake::Stake;
pub use tiers::{Tier, TierRequirement, TierTable, BPS, DAY, UNIT};

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAdmin = 3,
    NotRewardsDistributor = 4,
    InvalidInput = 5,
    AmountBelowMinimum = 6,
    DurationBelowMinimum = 7,
    /// Missing stake, stake owned by someone else, or already unstaked.
    StakeNotActive = 8,
    StakeLocked = 9,
    InsufficientRewardsPool = 10,
    CannotWithdrawStakedPrincipal = 11,
    TransferFailed = 12,
    Paused = 13,
    ArithmeticOverflow = 14,
    StakeNotFound = 15,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `token`              – token contract that holds principal and rewards.
    /// * `reward_rate`        – base reward units per second per stake.
    /// * `min_stake_amount`   – smallest admissible principal.
    /// * `min_stake_duration` – shortest admissible lock, in seconds.
    ///
    /// `admin` receives both the `Admin` and `RewardsDistributor` capabilities.
    /// The tier table and duration bonus schedule start from their defaults.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        reward_rate: i128,
        min_stake_amount: i128,
        min_stake_duration: u64,
    ) -> Result<(), ContractError> {
        if config::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if !(0..=rewards::MAX_REWARD_RATE).contains(&reward_rate) || min_stake_amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        config::mark_initialized(&env, &token);
        config::set_reward_rate(&env, reward_rate);
        config::set_min_stake(&env, min_stake_amount, min_stake_duration);
        config::store_tier_table(
            &env,
            &TierTable::with_defaults(min_stake_amount, min_stake_duration),
        );
        config::set_bonus_schedule(&env, &bonus::default_schedule(&env));
        // TOT_STK, RWD_POOL and the role counters start at zero;
        // unwrap_or(0) handles absent keys, so no explicit init needed.

        access::grant(&env, &admin, Capability::Admin);
        access::grant(&env, &admin, Capability::RewardsDistributor);

        events::publish_initialized(
            &env,
            admin,
            token,
            reward_rate,
            min_stake_amount,
            min_stake_duration,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Lock `amount` for `duration` seconds and return the new stake id.
    ///
    /// The stake is classified once, here, from `(amount, duration)`.
    pub fn create_stake(
        env: Env,
        owner: Address,
        amount: i128,
        duration: u64,
    ) -> Result<u64, ContractError> {
        config::require_initialized(&env)?;
        owner.require_auth();
        config::require_not_paused(&env, &OP_CREATE)?;

        if amount < config::min_stake_amount(&env) {
            return Err(ContractError::AmountBelowMinimum);
        }
        if duration < config::min_stake_duration(&env) {
            return Err(ContractError::DurationBelowMinimum);
        }

        let now = env.ledger().timestamp();
        let end_time = now
            .checked_add(duration)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let new_total = config::total_staked(&env)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let tier = config::tier_table(&env)?.classify(amount, duration);

        // 1. Record the stake and every counter it affects.
        let stake = Stake {
            id: stake::next_id(&env, &owner),
            owner: owner.clone(),
            amount,
            nominal_duration: duration,
            start_time: now,
            end_time,
            last_claim_time: now,
            banked_rewards: 0,
            decay_start: now,
            tier,
            active: true,
        };
        stake::store(&env, &stake);
        config::set_total_staked(&env, new_total);
        roles::on_transition(&env, &owner, None, Some(tier));

        // 2. Pull principal into custody.
        Self::pull(&env, &owner, amount)?;

        events::publish_stake_created(&env, owner, stake.id, amount, duration, tier, end_time);

        Ok(stake.id)
    }

    /// Add `additional_amount` to an active stake and reclassify it against
    /// its unchanged nominal duration.
    pub fn increase_stake(
        env: Env,
        owner: Address,
        stake_id: u64,
        additional_amount: i128,
    ) -> Result<(), ContractError> {
        config::require_initialized(&env)?;
        owner.require_auth();
        config::require_not_paused(&env, &OP_INCREASE)?;

        let mut stake = stake::load_active(&env, &owner, stake_id)?;
        if additional_amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let now = env.ledger().timestamp();
        Self::bank_rewards(&env, &mut stake, now)?;

        stake.amount = stake
            .amount
            .checked_add(additional_amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let new_total = config::total_staked(&env)
            .checked_add(additional_amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Self::reclassify(&env, &mut stake)?;

        stake::store(&env, &stake);
        config::set_total_staked(&env, new_total);

        Self::pull(&env, &owner, additional_amount)?;

        events::publish_stake_increased(&env, owner, stake_id, additional_amount, stake.amount);

        Ok(())
    }

    /// Push maturity out by `additional_duration` seconds. The nominal duration
    /// grows by the same amount and governance decay restarts from now.
    pub fn extend_stake(
        env: Env,
        owner: Address,
        stake_id: u64,
        additional_duration: u64,
    ) -> Result<(), ContractError> {
        config::require_initialized(&env)?;
        owner.require_auth();
        config::require_not_paused(&env, &OP_EXTEND)?;

        let mut stake = stake::load_active(&env, &owner, stake_id)?;
        if additional_duration == 0 {
            return Err(ContractError::InvalidInput);
        }

        let now = env.ledger().timestamp();
        Self::bank_rewards(&env, &mut stake, now)?;

        stake.end_time = stake
            .end_time
            .checked_add(additional_duration)
            .ok_or(ContractError::ArithmeticOverflow)?;
        stake.nominal_duration = stake
            .nominal_duration
            .checked_add(additional_duration)
            .ok_or(ContractError::ArithmeticOverflow)?;
        stake.decay_start = now;
        Self::reclassify(&env, &mut stake)?;

        stake::store(&env, &stake);

        events::publish_stake_extended(&env, owner, stake_id, additional_duration, stake.end_time);

        Ok(())
    }

    /// Pay out everything owed on an active stake and reset its baseline.
    ///
    /// Fails without paying anything if the rewards pool cannot cover the
    /// full amount. Returns `0` when nothing has accrued.
    pub fn claim_rewards(env: Env, owner: Address, stake_id: u64) -> Result<i128, ContractError> {
        config::require_initialized(&env)?;
        owner.require_auth();
        config::require_function_open(&env, &OP_CLAIM)?;

        let mut stake = stake::load_active(&env, &owner, stake_id)?;
        let now = env.ledger().timestamp();
        let reward = Self::owed(&env, &stake, now)?;

        let pool = config::rewards_pool(&env);
        if reward > pool {
            return Err(ContractError::InsufficientRewardsPool);
        }

        // Checks-effects-interactions: settle before paying out.
        stake.last_claim_time = now;
        stake.banked_rewards = 0;
        stake::store(&env, &stake);
        config::set_rewards_pool(&env, pool - reward);

        if reward > 0 {
            Self::push(&env, &owner, reward)?;
        }

        events::publish_rewards_claimed(&env, owner, stake_id, reward);

        Ok(reward)
    }

    /// Close a matured stake: return principal plus the final reward in one
    /// transfer and deactivate the record. Returns the total paid out.
    pub fn unstake(env: Env, owner: Address, stake_id: u64) -> Result<i128, ContractError> {
        config::require_initialized(&env)?;
        owner.require_auth();
        config::require_function_open(&env, &OP_UNSTAKE)?;

        let mut stake = stake::load_active(&env, &owner, stake_id)?;
        let now = env.ledger().timestamp();
        if now < stake.end_time {
            return Err(ContractError::StakeLocked);
        }

        let reward = Self::owed(&env, &stake, now)?;
        let pool = config::rewards_pool(&env);
        if reward > pool {
            return Err(ContractError::InsufficientRewardsPool);
        }
        let payout = stake
            .amount
            .checked_add(reward)
            .ok_or(ContractError::ArithmeticOverflow)?;

        // Deactivate and release counters before the transfer goes out.
        let tier = stake.tier;
        stake.active = false;
        stake.last_claim_time = now;
        stake.banked_rewards = 0;
        stake::store(&env, &stake);
        config::set_total_staked(&env, config::total_staked(&env).saturating_sub(stake.amount));
        config::set_rewards_pool(&env, pool - reward);
        roles::on_transition(&env, &owner, Some(tier), None);

        Self::push(&env, &owner, payout)?;

        events::publish_unstaked(&env, owner, stake_id, stake.amount, reward);

        Ok(payout)
    }

    /// Top up the rewards pool from `distributor`'s balance.
    pub fn add_rewards(env: Env, distributor: Address, amount: i128) -> Result<(), ContractError> {
        config::require_initialized(&env)?;
        distributor.require_auth();
        if !access::has_capability(&env, &distributor, Capability::RewardsDistributor) {
            return Err(ContractError::NotRewardsDistributor);
        }
        config::require_function_open(&env, &OP_ADD_REWARDS)?;
        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let new_pool = config::rewards_pool(&env)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        config::set_rewards_pool(&env, new_pool);

        Self::pull(&env, &distributor, amount)?;

        events::publish_rewards_added(&env, distributor, amount, new_pool);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_stake(env: Env, owner: Address, stake_id: u64) -> Result<Stake, ContractError> {
        stake::load(&env, &owner, stake_id).ok_or(ContractError::StakeNotFound)
    }

    /// Number of stakes `owner` has ever opened, active or not.
    pub fn get_stake_count(env: Env, owner: Address) -> u64 {
        stake::count(&env, &owner)
    }

    /// Every stake record of `owner`, oldest first, including unstaked ones.
    pub fn get_stakes(env: Env, owner: Address) -> Vec<Stake> {
        let mut out = Vec::new(&env);
        for id in 1..=stake::count(&env, &owner) {
            if let Some(s) = stake::load(&env, &owner, id) {
                out.push_back(s);
            }
        }
        out
    }

    /// Rewards `claim_rewards` would pay right now.
    pub fn pending_rewards(env: Env, owner: Address, stake_id: u64) -> Result<i128, ContractError> {
        let stake = stake::load(&env, &owner, stake_id).ok_or(ContractError::StakeNotFound)?;
        Self::owed(&env, &stake, env.ledger().timestamp())
    }

    pub fn governance_weight(
        env: Env,
        owner: Address,
        stake_id: u64,
    ) -> Result<i128, ContractError> {
        let stake = stake::load(&env, &owner, stake_id).ok_or(ContractError::StakeNotFound)?;
        Self::weight_of(&env, &stake, env.ledger().timestamp())
    }

    /// Sum of governance weight over all of `owner`'s stakes.
    pub fn total_governance_weight(env: Env, owner: Address) -> Result<i128, ContractError> {
        let now = env.ledger().timestamp();
        let mut total: i128 = 0;
        for id in 1..=stake::count(&env, &owner) {
            let Some(s) = stake::load(&env, &owner, id) else {
                continue;
            };
            total = total
                .checked_add(Self::weight_of(&env, &s, now)?)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
        Ok(total)
    }

    /// Tier a new stake of `(amount, duration)` would receive under the
    /// current table.
    pub fn classify(env: Env, amount: i128, duration: u64) -> Result<Tier, ContractError> {
        Ok(config::tier_table(&env)?.classify(amount, duration))
    }

    pub fn bonus_for(env: Env, duration: u64) -> u32 {
        bonus::bonus_for(&config::bonus_schedule(&env), duration)
    }

    pub fn get_tier_requirement(env: Env, tier: Tier) -> Result<TierRequirement, ContractError> {
        config::tier_requirement(&env, tier)
    }

    pub fn get_duration_bonuses(env: Env) -> Vec<DurationBonus> {
        config::bonus_schedule(&env)
    }

    pub fn get_rewards_pool(env: Env) -> i128 {
        config::rewards_pool(&env)
    }

    pub fn get_total_staked(env: Env) -> i128 {
        config::total_staked(&env)
    }

    pub fn get_reward_rate(env: Env) -> i128 {
        config::reward_rate(&env)
    }

    pub fn get_min_stake_amount(env: Env) -> i128 {
        config::min_stake_amount(&env)
    }

    pub fn get_min_stake_duration(env: Env) -> u64 {
        config::min_stake_duration(&env)
    }

    pub fn get_validator_count(env: Env) -> u32 {
        roles::count(&env, Role::Validator)
    }

    pub fn get_node_operator_count(env: Env) -> u32 {
        roles::count(&env, Role::NodeOperator)
    }

    pub fn is_active_validator(env: Env, owner: Address) -> bool {
        roles::holds(&env, &owner, Role::Validator)
    }

    pub fn is_active_node_operator(env: Env, owner: Address) -> bool {
        roles::holds(&env, &owner, Role::NodeOperator)
    }

    pub fn is_paused(env: Env) -> bool {
        config::is_paused(&env)
    }

    pub fn is_function_paused(env: Env, op: Symbol) -> bool {
        config::is_function_paused(&env, &op)
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        config::token(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        config::is_initialized(&env)
    }

    pub fn has_capability(env: Env, who: Address, capability: Capability) -> bool {
        access::has_capability(&env, &who, capability)
    }

    pub fn get_capabilities(env: Env, who: Address) -> Vec<Capability> {
        access::capabilities_of(&env, &who)
    }

    /// Every address currently holding at least one capability.
    pub fn get_capability_holders(env: Env) -> Vec<Address> {
        access::list_holders(&env)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Replace one tier's requirement. Existing stakes keep the tier they were
    /// given; the new requirement applies from their next create/increase/extend.
    pub fn set_tier_requirement(
        env: Env,
        caller: Address,
        tier: Tier,
        requirement: TierRequirement,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;
        if requirement.min_amount < 0
            || requirement.reward_multiplier_bps > rewards::MAX_MULTIPLIER_BPS
        {
            return Err(ContractError::InvalidInput);
        }

        config::set_tier_requirement(&env, tier, &requirement);

        events::publish_tier_requirement_set(&env, tier, requirement);

        Ok(())
    }

    /// Insert or replace the bonus granted from `threshold` seconds upwards.
    pub fn set_duration_bonus(
        env: Env,
        caller: Address,
        threshold: u64,
        bonus_bps: u32,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;
        if bonus_bps > rewards::MAX_BONUS_BPS {
            return Err(ContractError::InvalidInput);
        }

        let mut schedule = config::bonus_schedule(&env);
        bonus::upsert(
            &mut schedule,
            DurationBonus {
                threshold,
                bonus_bps,
            },
        );
        config::set_bonus_schedule(&env, &schedule);

        events::publish_duration_bonus_set(&env, threshold, bonus_bps);

        Ok(())
    }

    pub fn remove_duration_bonus(
        env: Env,
        caller: Address,
        threshold: u64,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;

        let mut schedule = config::bonus_schedule(&env);
        if !bonus::remove(&mut schedule, threshold) {
            return Err(ContractError::InvalidInput);
        }
        config::set_bonus_schedule(&env, &schedule);

        events::publish_duration_bonus_removed(&env, threshold);

        Ok(())
    }

    /// Update the base reward rate. Applies to all time not yet settled.
    ///
    /// Capped at [`rewards::MAX_REWARD_RATE`] so accrual on an open stake can
    /// never overflow and lock its principal in.
    pub fn set_reward_rate(env: Env, caller: Address, new_rate: i128) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;
        if !(0..=rewards::MAX_REWARD_RATE).contains(&new_rate) {
            return Err(ContractError::InvalidInput);
        }

        config::set_reward_rate(&env, new_rate);

        events::publish_reward_rate_set(&env, new_rate);

        Ok(())
    }

    /// Update the admission minimums for new stakes.
    pub fn set_min_stake(
        env: Env,
        caller: Address,
        min_amount: i128,
        min_duration: u64,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;
        if min_amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        config::set_min_stake(&env, min_amount, min_duration);

        events::publish_min_stake_set(&env, min_amount, min_duration);

        Ok(())
    }

    pub fn pause(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;

        config::set_paused(&env, &scope, true);

        events::publish_paused(&env, caller, scope);

        Ok(())
    }

    pub fn unpause(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;

        config::set_paused(&env, &scope, false);

        events::publish_unpaused(&env, caller, scope);

        Ok(())
    }

    /// Move tokens that do not back any active stake's principal to `recipient`.
    ///
    /// Unreserved surplus goes first; whatever comes out of the rewards pool is
    /// deducted from it.
    pub fn emergency_withdraw(
        env: Env,
        caller: Address,
        amount: i128,
        recipient: Address,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;
        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let token = config::token(&env)?;
        let balance = token::Client::new(&env, &token).balance(&env.current_contract_address());
        let pool = config::rewards_pool(&env);
        let from_pool =
            config::emergency_pool_share(balance, config::total_staked(&env), pool, amount)?;

        config::set_rewards_pool(&env, pool - from_pool);

        Self::push(&env, &recipient, amount)?;

        events::publish_emergency_withdrawal(&env, caller, recipient, amount, from_pool);

        Ok(())
    }

    // ── Capability management ────────────────────────────────────────────────

    pub fn grant_capability(
        env: Env,
        caller: Address,
        target: Address,
        capability: Capability,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;

        if access::grant(&env, &target, capability) {
            events::publish_capability_granted(&env, caller, target, capability);
        }

        Ok(())
    }

    /// Admins cannot revoke their own `Admin` capability, so the contract is
    /// never left without one.
    pub fn revoke_capability(
        env: Env,
        caller: Address,
        target: Address,
        capability: Capability,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;
        if caller == target && capability == Capability::Admin {
            return Err(ContractError::InvalidInput);
        }

        if access::revoke(&env, &target, capability) {
            events::publish_capability_revoked(&env, caller, target, capability);
        }

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: initialized, authenticated, and holding `Admin`.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        config::require_initialized(env)?;
        caller.require_auth();
        if !access::has_capability(env, caller, Capability::Admin) {
            return Err(ContractError::NotAdmin);
        }
        Ok(())
    }

    /// Everything currently owed on `stake`, priced with its stored tier.
    fn owed(env: &Env, stake: &Stake, now: u64) -> Result<i128, ContractError> {
        let requirement = config::tier_requirement(env, stake.tier)?;
        let bonus_bps = bonus::bonus_for(&config::bonus_schedule(env), stake.nominal_duration);
        rewards::pending(
            stake,
            &requirement,
            bonus_bps,
            config::reward_rate(env),
            now,
        )
        .ok_or(ContractError::ArithmeticOverflow)
    }

    fn weight_of(env: &Env, stake: &Stake, now: u64) -> Result<i128, ContractError> {
        let requirement = config::tier_requirement(env, stake.tier)?;
        governance::weight(stake, requirement.governance_weight_bps, now)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Settle accrual under the current classification into the stake itself.
    fn bank_rewards(env: &Env, stake: &mut Stake, now: u64) -> Result<(), ContractError> {
        stake.banked_rewards = Self::owed(env, stake, now)?;
        stake.last_claim_time = now;
        Ok(())
    }

    /// Re-run classification after a mutation and move role counters along.
    fn reclassify(env: &Env, stake: &mut Stake) -> Result<(), ContractError> {
        let new_tier = config::tier_table(env)?.classify(stake.amount, stake.nominal_duration);
        if new_tier == stake.tier {
            return Ok(());
        }

        let old_tier = stake.tier;
        stake.tier = new_tier;
        roles::on_transition(env, &stake.owner, Some(old_tier), Some(new_tier));
        events::publish_tier_changed(env, stake.owner.clone(), stake.id, old_tier, new_tier);
        Ok(())
    }

    /// Pull `amount` from `from` into the contract.
    fn pull(env: &Env, from: &Address, amount: i128) -> Result<(), ContractError> {
        let token = config::token(env)?;
        match token::Client::new(env, &token).try_transfer(
            from,
            &env.current_contract_address(),
            &amount,
        ) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::TransferFailed),
        }
    }

    /// Push `amount` from the contract to `to`.
    fn push(env: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
        let token = config::token(env)?;
        match token::Client::new(env, &token).try_transfer(
            &env.current_contract_address(),
            to,
            &amount,
        ) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::TransferFailed),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
