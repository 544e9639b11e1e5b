extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env, InvokeError,
};

use common::roles::RoleKind;

use crate::{ContractError, TermRate, TermStakingContract, TermStakingContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (
    Env,
    TermStakingContractClient<'static>,
    Address, // owner
    Address, // supply controller
    Address, // staked-up user
    u64,     // the user's stake id
) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let token_id = token.address();

    let contract_id = env.register(TermStakingContract, ());
    let client = TermStakingContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let bank = Address::generate(&env);
    client.initialize(&owner, &token_id, &bank);

    let controller = Address::generate(&env);
    client.set_role(&owner, &RoleKind::SupplyController, &controller);
    client.set_reward_table(
        &controller,
        &vec![
            &env,
            TermRate {
                term_days: 30,
                rate_bps: 100,
            },
        ],
    );
    client.set_punishment_table(
        &controller,
        &vec![
            &env,
            TermRate {
                term_days: 30,
                rate_bps: 100,
            },
        ],
    );

    let user = Address::generate(&env);
    StellarAssetClient::new(&env, &token_id).mint(&user, &10_000_000_000i128);
    let stake_id = client.stake(&user, &1_000_000_000, &30);

    (env, client, owner, controller, user, stake_id)
}

fn expect_protocol_disabled<T, C>(result: Result<Result<T, C>, Result<ContractError, InvokeError>>) {
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ProtocolDisabled),
        _ => unreachable!("Expected ProtocolDisabled error"),
    }
}

// ── Pause control ─────────────────────────────────────────────────────────────

#[test]
fn test_only_owner_pauses_and_unpauses() {
    let (env, client, owner, controller, _user, _id) = setup();

    let intruder = Address::generate(&env);
    for caller in [&intruder, &controller] {
        let result = client.try_pause(caller);
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::PermissionDenied),
            _ => unreachable!("Expected PermissionDenied error"),
        }
    }

    client.pause(&owner);
    assert!(client.is_paused());
    client.unpause(&owner);
    assert!(!client.is_paused());
}

#[test]
fn test_redundant_pause_transitions_fail() {
    let (_env, client, owner, _controller, _user, _id) = setup();

    // Unpausing a running contract is a caller mistake.
    let result = client.try_unpause(&owner);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }

    client.pause(&owner);
    let result = client.try_pause(&owner);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

// ── Paused behaviour ──────────────────────────────────────────────────────────

#[test]
fn test_pause_blocks_every_mutation() {
    let (env, client, owner, controller, user, stake_id) = setup();

    client.pause(&owner);

    expect_protocol_disabled(client.try_stake(&user, &1_000_000_000, &30));
    expect_protocol_disabled(client.try_unstake(&user, &stake_id, &1_000_000_000));
    expect_protocol_disabled(client.try_stake_for(&controller, &user, &1_000, &30));
    expect_protocol_disabled(client.try_set_reward(&controller, &30, &200));
    expect_protocol_disabled(client.try_set_punishment(&controller, &30, &200));
    expect_protocol_disabled(client.try_enable_staking_protocol(&controller, &false));
    expect_protocol_disabled(client.try_set_minimum_stake(&controller, &1_000));
    expect_protocol_disabled(client.try_set_token_bank(&controller, &user));

    // Role management freezes too.
    let someone = Address::generate(&env);
    expect_protocol_disabled(client.try_set_role(&owner, &RoleKind::Minter, &someone));
    expect_protocol_disabled(client.try_set_admin_role(&owner, &someone));
    expect_protocol_disabled(client.try_transfer_ownership(&owner, &someone));
    expect_protocol_disabled(client.try_transfer_super_admin(&owner, &someone));
    expect_protocol_disabled(client.try_transfer_ownership_and_roles(&owner, &someone));
}

#[test]
fn test_reads_survive_a_pause() {
    let (env, client, owner, _controller, user, _id) = setup();

    client.pause(&owner);

    assert_eq!(client.stake_of(&user), 1_000_000_000);
    assert_eq!(client.total_stakes(), 1_000_000_000);
    assert_eq!(client.reward_rate(&30), 100);
    assert!(client.is_stakeholder(&user));

    // The clock keeps running while paused; accrual views still answer.
    env.ledger().set_timestamp(30 * 86_400);
    assert_eq!(client.reward_of(&user), 10_000_000);
}

#[test]
fn test_unpause_restores_operation() {
    let (env, client, owner, _controller, user, stake_id) = setup();

    client.pause(&owner);
    expect_protocol_disabled(client.try_stake(&user, &1_000_000_000, &30));
    client.unpause(&owner);

    client.stake(&user, &1_000_000_000, &30);

    env.ledger().set_timestamp(30 * 86_400);
    client.unstake(&user, &stake_id, &1_000_000_000);
}
