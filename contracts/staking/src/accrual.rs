//! Settlement math: cliff maturity, history-weighted rewards, and the
//! creation-locked early-exit punishment.
//!
//! Rewards and punishments are deliberately asymmetric. A reward is
//! weighted across every rate period that overlapped the stake's window,
//! so changing the table mid-term never rewrites time already served. A
//! punishment uses the single rate locked into the stake when it was
//! created, so the cost of an early exit is known up front.

use soroban_sdk::Vec;

use crate::ledger::Stake;
use crate::rates::{self, RateEntry};

/// Nominal day length used to convert lock terms to ledger time.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Basis-point scale: 10_000 = 100%.
pub const BPS_SCALE: i128 = 10_000;

/// Full lock window length in seconds.
pub fn lock_seconds(term_days: u32) -> u64 {
    term_days as u64 * SECONDS_PER_DAY
}

/// Whether the stake's full term has elapsed at `now`.
pub fn is_matured(stake: &Stake, now: u64) -> bool {
    now.saturating_sub(stake.started_at) >= lock_seconds(stake.term_days)
}

/// Reward owed on `amount` of the stake when settled at `now`.
///
/// Cliff accrual: zero until the full term has elapsed, with no pro-rata
/// credit. Once matured, the window `[started_at, started_at + term)` is
/// partitioned at every reward-rate change that falls strictly inside it;
/// each sub-interval earns at the rate in force at its start, and entries
/// at or past the window end are ignored. Elapsed time beyond the window
/// earns nothing.
///
/// The weighted sum stays in seconds × basis points and the floor division
/// happens exactly once at the end, so exact-division fixtures (for
/// example thirds of a 30-day term) come out to the token.
pub fn reward_accrued(history: &Vec<RateEntry>, stake: &Stake, amount: i128, now: u64) -> i128 {
    if !is_matured(stake, now) {
        return 0;
    }

    let window_start = stake.started_at;
    let window_end = window_start + lock_seconds(stake.term_days);

    let mut weighted: i128 = 0;
    let mut cursor = window_start;
    let mut rate = rates::rate_at(history, window_start) as i128;

    for entry in history.iter() {
        if entry.effective_at <= window_start {
            // Folded into the opening rate already.
            continue;
        }
        if entry.effective_at >= window_end {
            break;
        }
        weighted += (entry.effective_at - cursor) as i128 * rate;
        cursor = entry.effective_at;
        rate = entry.rate_bps as i128;
    }
    weighted += (window_end - cursor) as i128 * rate;

    amount * weighted / (lock_seconds(stake.term_days) as i128 * BPS_SCALE)
}

/// Punishment due when `amount` of the stake exits before maturity, at the
/// rate locked when the stake was created. Never exceeds `amount`.
pub fn punishment_due(stake: &Stake, amount: i128) -> i128 {
    let due = amount * stake.locked_punishment_bps as i128 / BPS_SCALE;
    due.min(amount)
}
