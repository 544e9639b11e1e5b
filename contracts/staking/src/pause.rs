use soroban_sdk::{symbol_short, Env, Symbol};

use crate::errors::ContractError;

const PAUSED: Symbol = symbol_short!("PAUSED");

/// Whether the protocol-wide pause flag is engaged.
pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Gate run by every mutating entry point. A paused ledger rejects
/// mutations exactly like a disabled protocol; reads stay available.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::ProtocolDisabled);
    }
    Ok(())
}

/// Flips the flag. Authorization is the caller's responsibility.
pub fn set_paused(env: &Env, value: bool) {
    env.storage().instance().set(&PAUSED, &value);
}
