#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use common::roles::RoleKind;

use crate::rates::RateKind;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub stake_token: Address,
    pub token_bank: Address,
    pub timestamp: u64,
}

/// Fired when a deposit opens a new stake record.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeCreatedEvent {
    pub stake_id: u64,
    pub account: Address,
    pub amount: i128,
    pub term_days: u32,
    pub locked_punishment_bps: u32,
    pub timestamp: u64,
}

/// Fired when a same-instant deposit merges into an existing record.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeMergedEvent {
    pub stake_id: u64,
    pub account: Address,
    pub amount_added: i128,
    pub new_amount: i128,
    pub timestamp: u64,
}

/// Fired when a stake record is decremented to zero and removed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRemovedEvent {
    pub stake_id: u64,
    pub account: Address,
    pub timestamp: u64,
}

/// Fired when a matured exit pays out a reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub account: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when an early exit forfeits a punishment to the token bank.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PunishmentAppliedEvent {
    pub account: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired on every rate-table append.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateSetEvent {
    pub kind: RateKind,
    pub term_days: u32,
    pub rate_bps: u32,
    pub timestamp: u64,
}

/// Fired when a role is granted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleGrantedEvent {
    pub role: Symbol,
    pub account: Address,
    pub granted_by: Address,
    pub timestamp: u64,
}

/// Fired when a role is revoked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleRevokedEvent {
    pub role: Symbol,
    pub account: Address,
    pub revoked_by: Address,
    pub timestamp: u64,
}

/// Fired when ownership moves to a new holder.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

/// Fired when the super-admin singleton moves to a new holder.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SuperAdminTransferredEvent {
    pub previous_super_admin: Address,
    pub new_super_admin: Address,
    pub timestamp: u64,
}

/// Fired when a protocol flag flips (staking, early unstaking, pause).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolToggledEvent {
    pub flag: Symbol,
    pub value: bool,
    pub timestamp: u64,
}

/// Fired when the minimum allowed stake changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinimumStakeSetEvent {
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the punishment collection account changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenBankSetEvent {
    pub account: Address,
    pub timestamp: u64,
}

// ── Role symbols ────────────────────────────────────────────────────────────

/// Symbol used in role events for a functional role kind.
pub fn role_symbol(kind: RoleKind) -> Symbol {
    match kind {
        RoleKind::Minter => symbol_short!("MINTER"),
        RoleKind::Burner => symbol_short!("BURNER"),
        RoleKind::AssetProtector => symbol_short!("PROTECTOR"),
        RoleKind::SupplyController => symbol_short!("SUP_CTRL"),
    }
}

/// Symbol used in role events for the admin membership set.
pub fn admin_symbol() -> Symbol {
    symbol_short!("ADMIN")
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, stake_token: Address, token_bank: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            stake_token,
            token_bank,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_created(
    env: &Env,
    stake_id: u64,
    account: Address,
    amount: i128,
    term_days: u32,
    locked_punishment_bps: u32,
) {
    env.events().publish(
        (symbol_short!("STK_NEW"), account.clone()),
        StakeCreatedEvent {
            stake_id,
            account,
            amount,
            term_days,
            locked_punishment_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_merged(
    env: &Env,
    stake_id: u64,
    account: Address,
    amount_added: i128,
    new_amount: i128,
) {
    env.events().publish(
        (symbol_short!("STK_MRG"), account.clone()),
        StakeMergedEvent {
            stake_id,
            account,
            amount_added,
            new_amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_removed(env: &Env, stake_id: u64, account: Address) {
    env.events().publish(
        (symbol_short!("STK_DEL"), account.clone()),
        StakeRemovedEvent {
            stake_id,
            account,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, account: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), account.clone()),
        RewardPaidEvent {
            account,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_punishment_applied(env: &Env, account: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("PUNISHED"), account.clone()),
        PunishmentAppliedEvent {
            account,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rate_set(env: &Env, kind: RateKind, term_days: u32, rate_bps: u32) {
    env.events().publish(
        (symbol_short!("RATE_SET"),),
        RateSetEvent {
            kind,
            term_days,
            rate_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_granted(env: &Env, role: Symbol, account: Address, granted_by: Address) {
    env.events().publish(
        (symbol_short!("ROLE_SET"), account.clone()),
        RoleGrantedEvent {
            role,
            account,
            granted_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_revoked(env: &Env, role: Symbol, account: Address, revoked_by: Address) {
    env.events().publish(
        (symbol_short!("ROLE_DEL"), account.clone()),
        RoleRevokedEvent {
            role,
            account,
            revoked_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_ownership_transferred(env: &Env, previous_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWNER"), new_owner.clone()),
        OwnershipTransferredEvent {
            previous_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_super_admin_transferred(
    env: &Env,
    previous_super_admin: Address,
    new_super_admin: Address,
) {
    env.events().publish(
        (symbol_short!("S_ADMIN"), new_super_admin.clone()),
        SuperAdminTransferredEvent {
            previous_super_admin,
            new_super_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_protocol_toggled(env: &Env, flag: Symbol, value: bool) {
    env.events().publish(
        (symbol_short!("TOGGLE"), flag.clone()),
        ProtocolToggledEvent {
            flag,
            value,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_minimum_stake_set(env: &Env, amount: i128) {
    env.events().publish(
        (symbol_short!("MIN_STK"),),
        MinimumStakeSetEvent {
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_token_bank_set(env: &Env, account: Address) {
    env.events().publish(
        (symbol_short!("TOK_BANK"),),
        TokenBankSetEvent {
            account,
            timestamp: env.ledger().timestamp(),
        },
    );
}
