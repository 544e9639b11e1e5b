use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

use crate::errors::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

const REWARD_HIST: Symbol = symbol_short!("RWD_HIST");
const PUNISH_HIST: Symbol = symbol_short!("PUN_HIST");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Types ────────────────────────────────────────────────────────────────────

/// The two rate series kept per lock term.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RateKind {
    Reward = 1,
    Punishment = 2,
}

/// A single point in a term's rate history. Rates are basis points:
/// 10_000 = 100%.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateEntry {
    pub rate_bps: u32,
    pub effective_at: u64,
}

/// One `(term, rate)` pair for the bulk table-seeding entry points.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TermRate {
    pub term_days: u32,
    pub rate_bps: u32,
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn history_key(kind: RateKind, term_days: u32) -> (Symbol, u32) {
    match kind {
        RateKind::Reward => (REWARD_HIST, term_days),
        RateKind::Punishment => (PUNISH_HIST, term_days),
    }
}

fn extend_ttl(env: &Env, key: &(Symbol, u32)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── History access ───────────────────────────────────────────────────────────

/// Ordered history for a term; empty for terms never configured.
pub fn history(env: &Env, kind: RateKind, term_days: u32) -> Vec<RateEntry> {
    env.storage()
        .persistent()
        .get(&history_key(kind, term_days))
        .unwrap_or(Vec::new(env))
}

/// Appends `{rate_bps, now}` to the term's history, creating the term on
/// first use.
///
/// Histories are append-only with strictly increasing `effective_at`. A
/// second append within the same ledger timestamp lands in the same
/// serialized instant, so it overwrites the final entry's rate instead of
/// breaking the ordering invariant.
pub fn append(env: &Env, kind: RateKind, term_days: u32, rate_bps: u32) {
    let key = history_key(kind, term_days);
    let mut hist: Vec<RateEntry> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env));

    let now = env.ledger().timestamp();
    let entry = RateEntry {
        rate_bps,
        effective_at: now,
    };

    match hist.last() {
        Some(last) if last.effective_at == now => {
            hist.set(hist.len() - 1, entry);
        }
        _ => {
            hist.push_back(entry);
        }
    }

    env.storage().persistent().set(&key, &hist);
    extend_ttl(env, &key);
}

/// Rate of the last history entry, or `UnknownTerm` when the term has
/// never been configured. There is deliberately no zero-rate default.
pub fn current(env: &Env, kind: RateKind, term_days: u32) -> Result<u32, ContractError> {
    history(env, kind, term_days)
        .last()
        .map(|entry| entry.rate_bps)
        .ok_or(ContractError::UnknownTerm)
}

/// The rate in force at `at`: the latest entry with `effective_at <= at`,
/// found by binary search. Returns 0 when the history starts after `at`.
pub fn rate_at(history: &Vec<RateEntry>, at: u64) -> u32 {
    let mut lo: u32 = 0;
    let mut hi: u32 = history.len();
    while lo < hi {
        let mid = (lo + hi) / 2;
        if history.get_unchecked(mid).effective_at <= at {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    if lo == 0 {
        0
    } else {
        history.get_unchecked(lo - 1).rate_bps
    }
}
