#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};
use staking::{PauseScope, StakingContract, StakingContractClient, DAY, UNIT};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Create { user: u8, amount: u64, duration: u32 },
    Increase { user: u8, stake: u8, amount: u64 },
    Extend { user: u8, stake: u8, duration: u32 },
    Claim { user: u8, stake: u8 },
    Unstake { user: u8, stake: u8 },
    AddRewards { amount: u64 },
    SetRate { rate: u32 },
    EmergencyWithdraw { amount: u64 },
    TogglePause,
    Advance { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token, &10, &(100 * UNIT), &(7 * DAY));

    let sac = StellarAssetClient::new(&env, &token);
    sac.mint(&admin, &(i64::MAX as i128));

    let mut users = vec![admin.clone()];
    for _ in 0..4 {
        let user = Address::generate(&env);
        sac.mint(&user, &(i64::MAX as i128));
        users.push(user);
    }

    let mut now = 0u64;
    let mut paused = false;

    // Any failure must surface as a contract error, never a host panic, and
    // principal must stay fully backed after every step.
    for action in actions {
        match action {
            FuzzAction::Create { user, amount, duration } => {
                let caller = &users[user as usize % users.len()];
                let _ = client.try_create_stake(caller, &(amount as i128), &(duration as u64));
            }
            FuzzAction::Increase { user, stake, amount } => {
                let caller = &users[user as usize % users.len()];
                let _ = client.try_increase_stake(caller, &(stake as u64), &(amount as i128));
            }
            FuzzAction::Extend { user, stake, duration } => {
                let caller = &users[user as usize % users.len()];
                let _ = client.try_extend_stake(caller, &(stake as u64), &(duration as u64));
            }
            FuzzAction::Claim { user, stake } => {
                let caller = &users[user as usize % users.len()];
                let _ = client.try_claim_rewards(caller, &(stake as u64));
            }
            FuzzAction::Unstake { user, stake } => {
                let caller = &users[user as usize % users.len()];
                let _ = client.try_unstake(caller, &(stake as u64));
            }
            FuzzAction::AddRewards { amount } => {
                let _ = client.try_add_rewards(&admin, &(amount as i128));
            }
            FuzzAction::SetRate { rate } => {
                let _ = client.try_set_reward_rate(&admin, &(rate as i128));
            }
            FuzzAction::EmergencyWithdraw { amount } => {
                let _ = client.try_emergency_withdraw(&admin, &(amount as i128), &admin);
            }
            FuzzAction::TogglePause => {
                paused = !paused;
                if paused {
                    let _ = client.try_pause(&admin, &PauseScope::Global);
                } else {
                    let _ = client.try_unpause(&admin, &PauseScope::Global);
                }
            }
            FuzzAction::Advance { seconds } => {
                now = now.saturating_add(seconds as u64);
                env.ledger().set_timestamp(now);
            }
        }

        let custody = TokenClient::new(&env, &token).balance(&contract_id);
        assert!(custody >= client.get_total_staked() + client.get_rewards_pool());
    }
});
