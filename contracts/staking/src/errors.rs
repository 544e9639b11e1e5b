use soroban_sdk::contracterror;

/// Errors raised by the term-staking ledger.
///
/// Every precondition is checked before any storage write or token
/// movement, so a returned error always means the invocation reverted
/// with zero observable side effects.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    PermissionDenied = 3,
    ProtocolDisabled = 4,
    InsufficientBalance = 5,
    BelowMinimumStake = 6,
    UnknownTerm = 7,
    StakeNotFound = 8,
    AmountExceedsStake = 9,
    EarlyUnstakeDisabled = 10,
    InvalidInput = 11,
}

impl ContractError {
    /// Human-readable description, mainly for off-chain tooling.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::PermissionDenied => "Caller lacks the required role",
            ContractError::ProtocolDisabled => "Staking protocol is disabled or paused",
            ContractError::InsufficientBalance => "Free balance is below the requested amount",
            ContractError::BelowMinimumStake => "Amount is below the minimum allowed stake",
            ContractError::UnknownTerm => "No rate has been configured for this lock term",
            ContractError::StakeNotFound => "No active stake with this id for the account",
            ContractError::AmountExceedsStake => "Amount exceeds the stake's remaining value",
            ContractError::EarlyUnstakeDisabled => "Early unstaking is currently disabled",
            ContractError::InvalidInput => "Invalid input parameters provided",
        }
    }
}
