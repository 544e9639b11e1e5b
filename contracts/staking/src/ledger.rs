use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage key constants ────────────────────────────────────────────────────

const STAKES_PREFIX: Symbol = symbol_short!("STAKES");
const ACCOUNT_TOTAL: Symbol = symbol_short!("ACC_TOT");
const LATEST_AMOUNT: Symbol = symbol_short!("LATEST");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const LAST_STAKE_ID: Symbol = symbol_short!("LAST_ID");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Types ────────────────────────────────────────────────────────────────────

/// An active locked position.
///
/// `locked_punishment_bps` is captured from the punishment table when the
/// stake is created and never changes afterwards, even if the table does:
/// the early-exit penalty is fixed at the moment of commitment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stake {
    pub id: u64,
    pub owner: Address,
    pub amount: i128,
    pub term_days: u32,
    pub started_at: u64,
    pub locked_punishment_bps: u32,
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn stakes_key(account: &Address) -> (Symbol, Address) {
    (STAKES_PREFIX, account.clone())
}

fn account_total_key(account: &Address) -> (Symbol, Address) {
    (ACCOUNT_TOTAL, account.clone())
}

fn latest_key(account: &Address) -> (Symbol, Address) {
    (LATEST_AMOUNT, account.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Reads ────────────────────────────────────────────────────────────────────

/// The account's active stakes, in creation order.
pub fn stakes_of(env: &Env, account: &Address) -> Vec<Stake> {
    env.storage()
        .persistent()
        .get(&stakes_key(account))
        .unwrap_or(Vec::new(env))
}

/// Sum of the account's active stake amounts.
pub fn staked_of(env: &Env, account: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&account_total_key(account))
        .unwrap_or(0i128)
}

/// Amount passed in the account's most recent successful stake call.
pub fn latest_of(env: &Env, account: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&latest_key(account))
        .unwrap_or(0i128)
}

/// Total value locked across all accounts.
pub fn total_staked(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0i128)
}

/// The most recently allocated stake id; 0 before any stake exists.
pub fn last_stake_id(env: &Env) -> u64 {
    env.storage().instance().get(&LAST_STAKE_ID).unwrap_or(0u64)
}

/// Locates a stake by id within the account's ledger.
pub fn find(env: &Env, account: &Address, stake_id: u64) -> Option<(u32, Stake)> {
    let stakes = stakes_of(env, account);
    for i in 0..stakes.len() {
        let stake = stakes.get_unchecked(i);
        if stake.id == stake_id {
            return Some((i, stake));
        }
    }
    None
}

// ── Writes ───────────────────────────────────────────────────────────────────

/// Records a deposit of `amount` for `account`.
///
/// Two stakes for the same account, term, and ledger timestamp land in the
/// same serialized instant and are merged into one record; otherwise a new
/// record is created under the next global id. All aggregates (per-account
/// total, latest amount, total value locked) are updated in the same call
/// so the sum invariant holds after every operation.
///
/// Returns `(stake_id, merged, new_record_amount)`.
pub fn record_stake(
    env: &Env,
    account: &Address,
    amount: i128,
    term_days: u32,
    now: u64,
    locked_punishment_bps: u32,
) -> (u64, bool, i128) {
    let key = stakes_key(account);
    let mut stakes: Vec<Stake> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env));

    let mut merged_into: Option<(u64, i128)> = None;
    for i in 0..stakes.len() {
        let mut stake = stakes.get_unchecked(i);
        if stake.term_days == term_days && stake.started_at == now {
            stake.amount += amount;
            merged_into = Some((stake.id, stake.amount));
            stakes.set(i, stake);
            break;
        }
    }

    let (id, merged, new_amount) = match merged_into {
        Some((id, total)) => (id, true, total),
        None => {
            let id = next_stake_id(env);
            stakes.push_back(Stake {
                id,
                owner: account.clone(),
                amount,
                term_days,
                started_at: now,
                locked_punishment_bps,
            });
            (id, false, amount)
        }
    };

    env.storage().persistent().set(&key, &stakes);
    extend_ttl(env, &key);

    let latest = latest_key(account);
    env.storage().persistent().set(&latest, &amount);
    extend_ttl(env, &latest);

    bump_account_total(env, account, amount);
    bump_total_staked(env, amount);

    (id, merged, new_amount)
}

/// Decrements the stake at `index` by `amount`, removing the record when it
/// reaches zero, and keeps the aggregates in step.
///
/// Callers must have validated `amount <= stake.amount`. Returns whether
/// the record was removed.
pub fn reduce_stake(env: &Env, account: &Address, index: u32, amount: i128) -> bool {
    let key = stakes_key(account);
    let mut stakes: Vec<Stake> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env));

    let mut stake = stakes.get_unchecked(index);
    let removed = stake.amount == amount;
    if removed {
        stakes.remove(index);
    } else {
        stake.amount -= amount;
        stakes.set(index, stake);
    }

    env.storage().persistent().set(&key, &stakes);
    extend_ttl(env, &key);

    bump_account_total(env, account, -amount);
    bump_total_staked(env, -amount);

    removed
}

fn next_stake_id(env: &Env) -> u64 {
    let id = last_stake_id(env) + 1;
    env.storage().instance().set(&LAST_STAKE_ID, &id);
    id
}

fn bump_account_total(env: &Env, account: &Address, delta: i128) {
    let key = account_total_key(account);
    let total: i128 = env.storage().persistent().get(&key).unwrap_or(0i128);
    env.storage().persistent().set(&key, &(total + delta));
    extend_ttl(env, &key);
}

fn bump_total_staked(env: &Env, delta: i128) {
    let total = total_staked(env);
    env.storage().instance().set(&TOTAL_STAKED, &(total + delta));
}
