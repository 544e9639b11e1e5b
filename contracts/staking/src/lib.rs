#![no_std]

pub mod accrual;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod pause;
pub mod rates;

use common::roles::{self, RoleKind};
use soroban_sdk::{
    contract, contractimpl, symbol_short, token, Address, Env, Symbol, Vec,
};

pub use errors::ContractError;
pub use ledger::Stake;
pub use rates::{RateEntry, RateKind, TermRate};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const TOKEN_BANK: Symbol = symbol_short!("TOK_BANK");
const STAKING_ENABLED: Symbol = symbol_short!("STK_ON");
const EARLY_UNSTAKING: Symbol = symbol_short!("EARLY_ON");
const MINIMUM_STAKE: Symbol = symbol_short!("MIN_STK");

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct TermStakingContract;

#[contractimpl]
impl TermStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `owner`       – initial Owner, seeded as SuperAdmin and Admin too.
    /// * `stake_token` – SAC address of the token being locked.
    /// * `token_bank`  – account collecting early-exit punishments.
    ///
    /// Staking and early unstaking start enabled with a zero minimum stake;
    /// rate tables start empty and must be seeded by a SupplyController
    /// before the first stake.
    pub fn initialize(
        env: Env,
        owner: Address,
        stake_token: Address,
        token_bank: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage().instance().set(&TOKEN_BANK, &token_bank);
        env.storage().instance().set(&STAKING_ENABLED, &true);
        env.storage().instance().set(&EARLY_UNSTAKING, &true);
        env.storage().instance().set(&MINIMUM_STAKE, &0i128);

        roles::seed_owner(&env, &owner);

        events::publish_initialized(&env, owner, stake_token, token_bank);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Lock `amount` of the caller's tokens for `term_days`.
    ///
    /// A second stake for the same term within the same ledger timestamp
    /// merges into the existing record instead of creating a new one.
    /// Returns the affected stake id.
    pub fn stake(
        env: Env,
        account: Address,
        amount: i128,
        term_days: u32,
    ) -> Result<u64, ContractError> {
        account.require_auth();
        Self::do_stake(&env, &account, &account, amount, term_days)
    }

    /// SupplyController variant of [`stake`](Self::stake): the caller funds
    /// a stake owned by `account`.
    pub fn stake_for(
        env: Env,
        caller: Address,
        account: Address,
        amount: i128,
        term_days: u32,
    ) -> Result<u64, ContractError> {
        caller.require_auth();
        if !roles::has_role(&env, RoleKind::SupplyController, &caller) {
            return Err(ContractError::PermissionDenied);
        }
        Self::do_stake(&env, &caller, &account, amount, term_days)
    }

    /// Withdraw `amount` from one of the caller's stakes.
    ///
    /// A matured stake pays `amount` plus the history-weighted reward; an
    /// early exit forfeits the reward entirely and moves the locked-rate
    /// punishment to the token bank. Returns the net amount credited to
    /// the account.
    pub fn unstake(
        env: Env,
        account: Address,
        stake_id: u64,
        amount: i128,
    ) -> Result<i128, ContractError> {
        account.require_auth();
        Self::do_unstake(&env, &account, stake_id, amount)
    }

    /// SupplyController variant of [`unstake`](Self::unstake). The proceeds
    /// still go to the stake's owner, never to the caller.
    pub fn unstake_for(
        env: Env,
        caller: Address,
        account: Address,
        stake_id: u64,
        amount: i128,
    ) -> Result<i128, ContractError> {
        caller.require_auth();
        if !roles::has_role(&env, RoleKind::SupplyController, &caller) {
            return Err(ContractError::PermissionDenied);
        }
        Self::do_unstake(&env, &account, stake_id, amount)
    }

    // ── Ledger views ────────────────────────────────────────────────────────

    /// Sum of the account's active stake amounts.
    pub fn stake_of(env: Env, account: Address) -> i128 {
        ledger::staked_of(&env, &account)
    }

    /// The account's active stakes, in creation order.
    pub fn stakes(env: Env, account: Address) -> Vec<Stake> {
        ledger::stakes_of(&env, &account)
    }

    /// Total staked across all accounts.
    pub fn total_stakes(env: Env) -> i128 {
        ledger::total_staked(&env)
    }

    /// Alias of [`total_stakes`](Self::total_stakes).
    pub fn total_value_locked(env: Env) -> i128 {
        ledger::total_staked(&env)
    }

    /// Amount of the account's most recent stake call.
    pub fn latest(env: Env, account: Address) -> i128 {
        ledger::latest_of(&env, &account)
    }

    pub fn last_stake_id(env: Env) -> u64 {
        ledger::last_stake_id(&env)
    }

    pub fn is_stakeholder(env: Env, account: Address) -> bool {
        ledger::staked_of(&env, &account) > 0
    }

    /// Reward the account would collect if every matured stake were settled
    /// now. Unmatured stakes contribute nothing (cliff accrual).
    pub fn reward_of(env: Env, account: Address) -> i128 {
        let now = env.ledger().timestamp();
        let mut total: i128 = 0;
        for stake in ledger::stakes_of(&env, &account).iter() {
            let hist = rates::history(&env, RateKind::Reward, stake.term_days);
            total += accrual::reward_accrued(&hist, &stake, stake.amount, now);
        }
        total
    }

    /// Punishment the account would forfeit if every unmatured stake were
    /// exited now, at each stake's creation-locked rate.
    pub fn punishment_of(env: Env, account: Address) -> i128 {
        let now = env.ledger().timestamp();
        let mut total: i128 = 0;
        for stake in ledger::stakes_of(&env, &account).iter() {
            if !accrual::is_matured(&stake, now) {
                total += accrual::punishment_due(&stake, stake.amount);
            }
        }
        total
    }

    // ── Rate table ──────────────────────────────────────────────────────────

    /// Append a reward rate for `term_days`, creating the term if unseen.
    /// SupplyController-only.
    pub fn set_reward(
        env: Env,
        caller: Address,
        term_days: u32,
        rate_bps: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        caller.require_auth();
        Self::append_rate(&env, &caller, RateKind::Reward, term_days, rate_bps)
    }

    /// Append a punishment rate for `term_days`. SupplyController-only.
    /// Running stakes are unaffected: their punishment rate was locked at
    /// creation.
    pub fn set_punishment(
        env: Env,
        caller: Address,
        term_days: u32,
        rate_bps: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        caller.require_auth();
        Self::append_rate(&env, &caller, RateKind::Punishment, term_days, rate_bps)
    }

    /// Bulk seeding variant of [`set_reward`](Self::set_reward).
    pub fn set_reward_table(
        env: Env,
        caller: Address,
        entries: Vec<TermRate>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        caller.require_auth();
        if entries.is_empty() {
            return Err(ContractError::InvalidInput);
        }
        for entry in entries.iter() {
            Self::append_rate(&env, &caller, RateKind::Reward, entry.term_days, entry.rate_bps)?;
        }
        Ok(())
    }

    /// Bulk seeding variant of [`set_punishment`](Self::set_punishment).
    pub fn set_punishment_table(
        env: Env,
        caller: Address,
        entries: Vec<TermRate>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        caller.require_auth();
        if entries.is_empty() {
            return Err(ContractError::InvalidInput);
        }
        for entry in entries.iter() {
            Self::append_rate(
                &env,
                &caller,
                RateKind::Punishment,
                entry.term_days,
                entry.rate_bps,
            )?;
        }
        Ok(())
    }

    /// Current reward rate for a term; `UnknownTerm` if never configured.
    pub fn reward_rate(env: Env, term_days: u32) -> Result<u32, ContractError> {
        rates::current(&env, RateKind::Reward, term_days)
    }

    /// Current punishment rate for a term; `UnknownTerm` if never configured.
    pub fn punishment_rate(env: Env, term_days: u32) -> Result<u32, ContractError> {
        rates::current(&env, RateKind::Punishment, term_days)
    }

    pub fn reward_rate_history(env: Env, term_days: u32) -> Vec<RateEntry> {
        rates::history(&env, RateKind::Reward, term_days)
    }

    pub fn punishment_rate_history(env: Env, term_days: u32) -> Vec<RateEntry> {
        rates::history(&env, RateKind::Punishment, term_days)
    }

    // ── Protocol configuration ──────────────────────────────────────────────

    /// Turn the staking protocol on or off. SupplyController-only. While
    /// off, new stakes are rejected but exits remain possible.
    pub fn enable_staking_protocol(
        env: Env,
        caller: Address,
        enabled: bool,
    ) -> Result<(), ContractError> {
        Self::require_supply_controller_toggle(&env, &caller)?;
        env.storage().instance().set(&STAKING_ENABLED, &enabled);
        events::publish_protocol_toggled(&env, symbol_short!("STAKING"), enabled);
        Ok(())
    }

    /// Allow or forbid exits before maturity. SupplyController-only.
    pub fn enable_early_unstaking(
        env: Env,
        caller: Address,
        enabled: bool,
    ) -> Result<(), ContractError> {
        Self::require_supply_controller_toggle(&env, &caller)?;
        env.storage().instance().set(&EARLY_UNSTAKING, &enabled);
        events::publish_protocol_toggled(&env, symbol_short!("EARLY_UN"), enabled);
        Ok(())
    }

    /// Set the minimum amount accepted by a single stake call.
    /// SupplyController-only.
    pub fn set_minimum_stake(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_supply_controller_toggle(&env, &caller)?;
        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }
        env.storage().instance().set(&MINIMUM_STAKE, &amount);
        events::publish_minimum_stake_set(&env, amount);
        Ok(())
    }

    /// Point punishment collection at a new account. SupplyController-only.
    pub fn set_token_bank(env: Env, caller: Address, account: Address) -> Result<(), ContractError> {
        Self::require_supply_controller_toggle(&env, &caller)?;
        env.storage().instance().set(&TOKEN_BANK, &account);
        events::publish_token_bank_set(&env, account);
        Ok(())
    }

    pub fn is_staking_protocol_enabled(env: Env) -> bool {
        Self::staking_enabled(&env)
    }

    pub fn is_early_unstaking_allowed(env: Env) -> bool {
        Self::early_unstaking_allowed(&env)
    }

    pub fn minimum_allowed_stake(env: Env) -> i128 {
        Self::minimum_stake(&env)
    }

    pub fn get_token_bank(env: Env) -> Result<Address, ContractError> {
        Self::token_bank(&env)
    }

    // ── Pause ───────────────────────────────────────────────────────────────

    /// Halt every mutating operation. Owner-only; fails if already paused.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !roles::is_owner(&env, &caller) {
            return Err(ContractError::PermissionDenied);
        }
        if pause::is_paused(&env) {
            return Err(ContractError::InvalidInput);
        }
        pause::set_paused(&env, true);
        events::publish_protocol_toggled(&env, symbol_short!("PAUSED"), true);
        Ok(())
    }

    /// Resume normal operation. Owner-only; fails if not paused.
    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !roles::is_owner(&env, &caller) {
            return Err(ContractError::PermissionDenied);
        }
        if !pause::is_paused(&env) {
            return Err(ContractError::InvalidInput);
        }
        pause::set_paused(&env, false);
        events::publish_protocol_toggled(&env, symbol_short!("PAUSED"), false);
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        pause::is_paused(&env)
    }

    // ── Role registry ───────────────────────────────────────────────────────

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        roles::owner(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn super_admin(env: Env) -> Result<Address, ContractError> {
        roles::super_admin(&env).ok_or(ContractError::NotInitialized)
    }

    /// Hand ownership to `new_owner`. Owner-only; a single atomic swap.
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        caller.require_auth();
        let previous = roles::owner(&env).ok_or(ContractError::NotInitialized)?;
        if !roles::transfer_ownership(&env, &caller, &new_owner) {
            return Err(ContractError::PermissionDenied);
        }
        events::publish_ownership_transferred(&env, previous, new_owner);
        Ok(())
    }

    /// Hand the super-admin singleton to `new_super_admin`. SuperAdmin-only.
    pub fn transfer_super_admin(
        env: Env,
        caller: Address,
        new_super_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        caller.require_auth();
        let previous = roles::super_admin(&env).ok_or(ContractError::NotInitialized)?;
        if !roles::transfer_super_admin(&env, &caller, &new_super_admin) {
            return Err(ContractError::PermissionDenied);
        }
        events::publish_super_admin_transferred(&env, previous, new_super_admin);
        Ok(())
    }

    /// Hand ownership to `new_owner` and move every functional role the old
    /// owner holds onto them, in one invocation. Owner-only.
    pub fn transfer_ownership_and_roles(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        caller.require_auth();
        let previous = roles::owner(&env).ok_or(ContractError::NotInitialized)?;
        let moved = roles::transfer_ownership_and_roles(&env, &caller, &new_owner)
            .ok_or(ContractError::PermissionDenied)?;
        for kind in moved.iter() {
            let role = events::role_symbol(kind);
            events::publish_role_revoked(&env, role.clone(), previous.clone(), caller.clone());
            events::publish_role_granted(&env, role, new_owner.clone(), caller.clone());
        }
        events::publish_ownership_transferred(&env, previous, new_owner);
        Ok(())
    }

    /// Add `account` to the admin set. SuperAdmin-only.
    pub fn set_admin_role(env: Env, caller: Address, account: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        caller.require_auth();
        if !roles::set_admin(&env, &caller, &account) {
            return Err(ContractError::PermissionDenied);
        }
        events::publish_role_granted(&env, events::admin_symbol(), account, caller);
        Ok(())
    }

    /// Remove `account` from the admin set. SuperAdmin-only.
    pub fn revoke_admin_role(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        caller.require_auth();
        if !roles::revoke_admin(&env, &caller, &account) {
            return Err(ContractError::PermissionDenied);
        }
        events::publish_role_revoked(&env, events::admin_symbol(), account, caller);
        Ok(())
    }

    /// Grant a functional role. Caller must be the Owner or an Admin.
    pub fn set_role(
        env: Env,
        caller: Address,
        kind: RoleKind,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        caller.require_auth();
        if !roles::set_role(&env, &caller, kind, &account) {
            return Err(ContractError::PermissionDenied);
        }
        events::publish_role_granted(&env, events::role_symbol(kind), account, caller);
        Ok(())
    }

    /// Revoke a functional role. Caller must be the Owner or an Admin.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        kind: RoleKind,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        caller.require_auth();
        if !roles::revoke_role(&env, &caller, kind, &account) {
            return Err(ContractError::PermissionDenied);
        }
        events::publish_role_revoked(&env, events::role_symbol(kind), account, caller);
        Ok(())
    }

    pub fn is_admin(env: Env, account: Address) -> bool {
        roles::is_admin(&env, &account)
    }

    pub fn is_minter(env: Env, account: Address) -> bool {
        roles::has_role(&env, RoleKind::Minter, &account)
    }

    pub fn is_burner(env: Env, account: Address) -> bool {
        roles::has_role(&env, RoleKind::Burner, &account)
    }

    pub fn is_asset_protector(env: Env, account: Address) -> bool {
        roles::has_role(&env, RoleKind::AssetProtector, &account)
    }

    pub fn is_supply_controller(env: Env, account: Address) -> bool {
        roles::has_role(&env, RoleKind::SupplyController, &account)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Shared preamble for the SupplyController configuration entry points.
    fn require_supply_controller_toggle(
        env: &Env,
        caller: &Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        pause::require_not_paused(env)?;
        caller.require_auth();
        if !roles::has_role(env, RoleKind::SupplyController, caller) {
            return Err(ContractError::PermissionDenied);
        }
        Ok(())
    }

    /// Role and input checks plus the actual append for one rate entry.
    /// Auth and pause gating happen in the entry points.
    fn append_rate(
        env: &Env,
        caller: &Address,
        kind: RateKind,
        term_days: u32,
        rate_bps: u32,
    ) -> Result<(), ContractError> {
        if !roles::has_role(env, RoleKind::SupplyController, caller) {
            return Err(ContractError::PermissionDenied);
        }
        if term_days == 0 {
            return Err(ContractError::InvalidInput);
        }
        rates::append(env, kind, term_days, rate_bps);
        events::publish_rate_set(env, kind, term_days, rate_bps);
        Ok(())
    }

    fn stake_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn token_bank(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN_BANK)
            .ok_or(ContractError::NotInitialized)
    }

    fn staking_enabled(env: &Env) -> bool {
        env.storage().instance().get(&STAKING_ENABLED).unwrap_or(false)
    }

    fn early_unstaking_allowed(env: &Env) -> bool {
        env.storage().instance().get(&EARLY_UNSTAKING).unwrap_or(false)
    }

    fn minimum_stake(env: &Env) -> i128 {
        env.storage().instance().get(&MINIMUM_STAKE).unwrap_or(0i128)
    }

    /// Every precondition runs before the first token movement or ledger
    /// write, so a failure reverts with nothing observable.
    fn do_stake(
        env: &Env,
        payer: &Address,
        account: &Address,
        amount: i128,
        term_days: u32,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(env)?;
        pause::require_not_paused(env)?;
        if !Self::staking_enabled(env) {
            return Err(ContractError::ProtocolDisabled);
        }
        if amount <= 0 || term_days == 0 {
            return Err(ContractError::InvalidInput);
        }
        if amount < Self::minimum_stake(env) {
            return Err(ContractError::BelowMinimumStake);
        }

        // Both tables must know the term: the reward table drives accrual
        // and the punishment table is sampled once, right here.
        rates::current(env, RateKind::Reward, term_days)?;
        let locked_punishment_bps = rates::current(env, RateKind::Punishment, term_days)?;

        let stake_token = Self::stake_token(env)?;
        let token = token::Client::new(env, &stake_token);
        if token.balance(payer) < amount {
            return Err(ContractError::InsufficientBalance);
        }
        token.transfer(payer, &env.current_contract_address(), &amount);

        let now = env.ledger().timestamp();
        let (stake_id, merged, new_amount) =
            ledger::record_stake(env, account, amount, term_days, now, locked_punishment_bps);

        if merged {
            events::publish_stake_merged(env, stake_id, account.clone(), amount, new_amount);
        } else {
            events::publish_stake_created(
                env,
                stake_id,
                account.clone(),
                amount,
                term_days,
                locked_punishment_bps,
            );
        }

        Ok(stake_id)
    }

    fn do_unstake(
        env: &Env,
        account: &Address,
        stake_id: u64,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(env)?;
        pause::require_not_paused(env)?;
        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let (index, stake) =
            ledger::find(env, account, stake_id).ok_or(ContractError::StakeNotFound)?;
        if amount > stake.amount {
            return Err(ContractError::AmountExceedsStake);
        }

        let now = env.ledger().timestamp();
        let matured = accrual::is_matured(&stake, now);
        if !matured && !Self::early_unstaking_allowed(env) {
            return Err(ContractError::EarlyUnstakeDisabled);
        }

        let stake_token = Self::stake_token(env)?;
        let token = token::Client::new(env, &stake_token);
        let contract = env.current_contract_address();

        let credited = if matured {
            let hist = rates::history(env, RateKind::Reward, stake.term_days);
            let reward = accrual::reward_accrued(&hist, &stake, amount, now);
            let credited = amount + reward;
            token.transfer(&contract, account, &credited);
            if reward > 0 {
                events::publish_reward_paid(env, account.clone(), reward);
            }
            credited
        } else {
            let punishment = accrual::punishment_due(&stake, amount);
            let credited = amount - punishment;
            if punishment > 0 {
                let bank = Self::token_bank(env)?;
                token.transfer(&contract, &bank, &punishment);
                events::publish_punishment_applied(env, account.clone(), punishment);
            }
            if credited > 0 {
                token.transfer(&contract, account, &credited);
            }
            credited
        };

        let removed = ledger::reduce_stake(env, account, index, amount);
        if removed {
            events::publish_stake_removed(env, stake_id, account.clone());
        }

        Ok(credited)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_pause;
