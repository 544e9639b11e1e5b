use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const SUPER_ADMIN: Symbol = symbol_short!("S_ADMIN");
const ADMIN_PREFIX: Symbol = symbol_short!("ADM");
const ROLE_PREFIX: Symbol = symbol_short!("ROLE");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Role Kinds ───────────────────────────────────────────────────────────────

/// Functional roles granted and revoked by the Owner or any Admin.
///
/// These are flat capability sets, not a hierarchy: holding one kind says
/// nothing about the others. The Owner/SuperAdmin singletons and the Admin
/// set live above them and are managed through their own operations.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RoleKind {
    Minter = 1,
    Burner = 2,
    AssetProtector = 3,
    SupplyController = 4,
}

impl RoleKind {
    /// Every functional role kind, in declaration order.
    pub fn all() -> [RoleKind; 4] {
        [
            RoleKind::Minter,
            RoleKind::Burner,
            RoleKind::AssetProtector,
            RoleKind::SupplyController,
        ]
    }
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn admin_key(account: &Address) -> (Symbol, Address) {
    (ADMIN_PREFIX, account.clone())
}

fn role_key(kind: RoleKind, account: &Address) -> (Symbol, RoleKind, Address) {
    (ROLE_PREFIX, kind, account.clone())
}

fn extend_ttl_admin_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_role_key(env: &Env, key: &(Symbol, RoleKind, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// Returns the current owner, if the registry has been seeded.
pub fn owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Returns the current super admin, if the registry has been seeded.
pub fn super_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&SUPER_ADMIN)
}

pub fn is_owner(env: &Env, account: &Address) -> bool {
    owner(env).is_some_and(|o| o == *account)
}

pub fn is_super_admin(env: &Env, account: &Address) -> bool {
    super_admin(env).is_some_and(|s| s == *account)
}

pub fn is_admin(env: &Env, account: &Address) -> bool {
    env.storage().persistent().has(&admin_key(account))
}

pub fn has_role(env: &Env, kind: RoleKind, account: &Address) -> bool {
    env.storage().persistent().has(&role_key(kind, account))
}

// ── Seeding ──────────────────────────────────────────────────────────────────

/// Seeds the registry at contract initialization.
///
/// The owner doubles as the initial super admin and sits in the admin set;
/// afterwards all three are managed independently (transferring ownership
/// or the super-admin singleton does not touch the admin membership).
/// Callers must guarantee this runs exactly once.
pub fn seed_owner(env: &Env, account: &Address) {
    env.storage().instance().set(&OWNER, account);
    env.storage().instance().set(&SUPER_ADMIN, account);
    let key = admin_key(account);
    env.storage().persistent().set(&key, &true);
    extend_ttl_admin_key(env, &key);
}

// ── Singleton Transfers ──────────────────────────────────────────────────────

/// Transfers ownership to `new`. Owner-only.
///
/// The swap is a single storage write, so there is never a state with zero
/// or two owners. Returns `false` (and writes nothing) if `caller` is not
/// the current owner.
pub fn transfer_ownership(env: &Env, caller: &Address, new: &Address) -> bool {
    if !is_owner(env, caller) {
        return false;
    }
    env.storage().instance().set(&OWNER, new);
    true
}

/// Transfers the super-admin singleton to `new`. SuperAdmin-only.
pub fn transfer_super_admin(env: &Env, caller: &Address, new: &Address) -> bool {
    if !is_super_admin(env, caller) {
        return false;
    }
    env.storage().instance().set(&SUPER_ADMIN, new);
    true
}

// ── Admin Set ────────────────────────────────────────────────────────────────

/// Adds `account` to the admin set. SuperAdmin-only. Idempotent.
pub fn set_admin(env: &Env, caller: &Address, account: &Address) -> bool {
    if !is_super_admin(env, caller) {
        return false;
    }
    let key = admin_key(account);
    env.storage().persistent().set(&key, &true);
    extend_ttl_admin_key(env, &key);
    true
}

/// Removes `account` from the admin set. SuperAdmin-only. Idempotent.
pub fn revoke_admin(env: &Env, caller: &Address, account: &Address) -> bool {
    if !is_super_admin(env, caller) {
        return false;
    }
    env.storage().persistent().remove(&admin_key(account));
    true
}

// ── Functional Roles ─────────────────────────────────────────────────────────

/// Grants a functional role. Caller must be the Owner or an Admin.
pub fn set_role(env: &Env, caller: &Address, kind: RoleKind, account: &Address) -> bool {
    if !is_owner(env, caller) && !is_admin(env, caller) {
        return false;
    }
    grant_role(env, kind, account);
    true
}

/// Revokes a functional role. Caller must be the Owner or an Admin.
pub fn revoke_role(env: &Env, caller: &Address, kind: RoleKind, account: &Address) -> bool {
    if !is_owner(env, caller) && !is_admin(env, caller) {
        return false;
    }
    env.storage().persistent().remove(&role_key(kind, account));
    true
}

fn grant_role(env: &Env, kind: RoleKind, account: &Address) {
    let key = role_key(kind, account);
    env.storage().persistent().set(&key, &true);
    extend_ttl_role_key(env, &key);
}

// ── Compound Transfer ────────────────────────────────────────────────────────

/// Transfers ownership to `new` and moves every functional role currently
/// held by the old owner onto `new`, in one invocation.
///
/// Returns the kinds that were moved so the contract can emit per-role
/// events, or `None` (with nothing written) if `caller` is not the owner.
pub fn transfer_ownership_and_roles(
    env: &Env,
    caller: &Address,
    new: &Address,
) -> Option<Vec<RoleKind>> {
    if !is_owner(env, caller) {
        return None;
    }

    let mut moved = Vec::new(env);
    for kind in RoleKind::all() {
        if has_role(env, kind, caller) {
            env.storage().persistent().remove(&role_key(kind, caller));
            grant_role(env, kind, new);
            moved.push_back(kind);
        }
    }

    env.storage().instance().set(&OWNER, new);
    Some(moved)
}
