#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the stake ledger and settlement math.
//!
//! Invariants tested:
//! - Total value locked always equals the sum of per-account stakes
//! - Cliff accrual: no reward whatsoever before the full term elapses
//! - A flat rate pays exactly amount × rate / 10_000 at maturity
//! - Punishment equals the locked rate applied to the amount, capped at
//!   the amount, and lands in the token bank to the token
//! - Partial exits drain a stake without leaving ledger residue

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{vec, Address, Env};

use common::roles::RoleKind;
use staking::{TermRate, TermStakingContract, TermStakingContractClient};

const DAY: u64 = 86_400;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (
    Env,
    TermStakingContractClient<'static>,
    Address, // supply controller
    Address, // stake token
    Address, // token bank
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

    (env, client, controller, token_id, bank)
}

fn seed_terms(env: &Env, client: &TermStakingContractClient<'_>, controller: &Address) {
    client.set_reward_table(
        controller,
        &vec![
            env,
            TermRate {
                term_days: 30,
                rate_bps: 100,
            },
            TermRate {
                term_days: 60,
                rate_bps: 100,
            },
        ],
    );
    client.set_punishment_table(
        controller,
        &vec![
            env,
            TermRate {
                term_days: 30,
                rate_bps: 100,
            },
            TermRate {
                term_days: 60,
                rate_bps: 100,
            },
        ],
    );
}

fn mint(env: &Env, token: &Address, recipient: &Address, amount: i128) {
    StellarAssetClient::new(env, token).mint(recipient, &amount);
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    /// Σ stake_of(account) == total_stakes() across arbitrary stake and
    /// early-exit sequences.
    #[test]
    fn prop_total_equals_sum_of_accounts(
        ops in proptest::collection::vec(
            (0usize..3usize, 1i128..1_000_000_000i128, any::<bool>()),
            1..8,
        )
    ) {
        let (env, client, controller, token, _bank) = setup();
        seed_terms(&env, &client, &controller);

        let users = [
            Address::generate(&env),
            Address::generate(&env),
            Address::generate(&env),
        ];
        for user in &users {
            mint(&env, &token, user, 10_000_000_000_000);
        }

        for (i, (user, amount, long_term)) in ops.iter().enumerate() {
            let term = if *long_term { 60u32 } else { 30u32 };
            client.stake(&users[*user], amount, &term);
            // Stagger the clock so records do not all merge.
            env.ledger().set_timestamp((i as u64 + 1) * 3_600);
        }

        let sum: i128 = users.iter().map(|user| client.stake_of(user)).sum();
        prop_assert_eq!(client.total_stakes(), sum);

        // Unwind one account completely (early exits) and re-check.
        for stake in client.stakes(&users[0]).iter() {
            client.unstake(&users[0], &stake.id, &stake.amount);
        }
        prop_assert_eq!(client.stake_of(&users[0]), 0);
        let sum: i128 = users.iter().map(|user| client.stake_of(user)).sum();
        prop_assert_eq!(client.total_stakes(), sum);
    }

    /// Reward is zero for any elapsed time strictly inside the term,
    /// regardless of what happened to the rate table meanwhile.
    #[test]
    fn prop_cliff_zero_before_maturity(
        elapsed_hours in 0u64..(30 * 24),
        mid_rate in 1u32..=10_000u32,
    ) {
        let (env, client, controller, token, _bank) = setup();
        seed_terms(&env, &client, &controller);

        let user = Address::generate(&env);
        mint(&env, &token, &user, 10_000_000_000);
        client.stake(&user, &10_000_000_000, &30);

        if elapsed_hours > 0 {
            env.ledger().set_timestamp(elapsed_hours * 3_600 / 2);
            client.set_reward(&controller, &30, &mid_rate);
        }

        env.ledger().set_timestamp(elapsed_hours * 3_600);
        prop_assert_eq!(client.reward_of(&user), 0);
    }

    /// A constant rate over the whole window pays exactly
    /// amount × rate / 10_000 at maturity, for any term length.
    #[test]
    fn prop_flat_rate_matches_closed_form(
        amount in 1i128..1_000_000_000_000i128,
        rate in 1u32..=10_000u32,
        term in 1u32..=365u32,
    ) {
        let (env, client, controller, token, _bank) = setup();
        client.set_reward(&controller, &term, &rate);
        client.set_punishment(&controller, &term, &100);

        let user = Address::generate(&env);
        mint(&env, &token, &user, amount);
        client.stake(&user, &amount, &term);

        env.ledger().set_timestamp(term as u64 * DAY);
        prop_assert_eq!(client.reward_of(&user), amount * rate as i128 / 10_000);
    }

    /// Early-exit punishment is floor(amount × locked_rate / 10_000),
    /// capped at the amount, and is credited to the token bank in full.
    #[test]
    fn prop_punishment_exact_and_capped(
        amount in 1i128..1_000_000_000_000i128,
        rate in 0u32..=20_000u32,
    ) {
        let (env, client, controller, token, bank) = setup();
        client.set_reward(&controller, &30, &100);
        client.set_punishment(&controller, &30, &rate);

        let user = Address::generate(&env);
        mint(&env, &token, &user, amount);
        let id = client.stake(&user, &amount, &30);

        env.ledger().set_timestamp(10 * DAY);
        let credited = client.unstake(&user, &id, &amount);

        let expected = (amount * rate as i128 / 10_000).min(amount);
        prop_assert_eq!(credited, amount - expected);
        prop_assert_eq!(TokenClient::new(&env, &token).balance(&bank), expected);
        prop_assert_eq!(TokenClient::new(&env, &token).balance(&user), amount - expected);
    }

    /// Splitting a matured stake into two withdrawals leaves no ledger
    /// residue and each part earns on its own amount.
    #[test]
    fn prop_partial_exits_leave_no_residue(
        amount in 2i128..1_000_000_000i128,
        split_seed in any::<u64>(),
    ) {
        let (env, client, controller, token, _bank) = setup();
        seed_terms(&env, &client, &controller);

        let user = Address::generate(&env);
        mint(&env, &token, &user, amount);
        // Reserve for the reward payouts.
        mint(&env, &token, &client.address, &amount);
        let id = client.stake(&user, &amount, &30);

        env.ledger().set_timestamp(30 * DAY);
        let split = 1 + (split_seed as i128 % (amount - 1)).abs();

        let first = client.unstake(&user, &id, &split);
        prop_assert_eq!(first, split + split * 100 / 10_000);
        prop_assert_eq!(client.stakes(&user).len(), 1);

        let rest = amount - split;
        let second = client.unstake(&user, &id, &rest);
        prop_assert_eq!(second, rest + rest * 100 / 10_000);
        prop_assert_eq!(client.stakes(&user).len(), 0);
        prop_assert_eq!(client.stake_of(&user), 0);
        prop_assert_eq!(client.total_stakes(), 0);
    }
}
