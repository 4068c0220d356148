pub const GLOBALS_SEED: &[u8] = b"globals";
pub const POOL_SEED: &[u8] = b"pool";
pub const LOCKER_SEED: &[u8] = b"liquidity_locker";
pub const LOCKER_VAULT_SEED: &[u8] = b"locker_vault";
pub const INVESTOR_SEED: &[u8] = b"investor";

/// Sub-factory kind for escrow locker factories
pub const LOCKER_FACTORY: u8 = 1;

/// Longest caller-supplied pool identifier, in bytes
pub const MAX_POOL_ID_LEN: usize = 32;

pub const MAX_POOL_FACTORIES: usize = 8;
pub const MAX_SUB_FACTORIES: usize = 8;
pub const MAX_POOL_DELEGATES: usize = 32;
pub const MAX_LIQUIDITY_ASSETS: usize = 16;
pub const MAX_FACTORY_ADMINS: usize = 8;
pub const MAX_POOL_ADMINS: usize = 8;

/// Fixed-point scale of `Pool::points_per_share`
pub const POINTS_MULTIPLIER: u128 = 1 << 64;
