use anchor_lang::prelude::*;

/// Escrow holding a pool's liquidity asset.
///
/// Seeds: ["liquidity_locker", pool]
/// Authority over `vault`; only the owning pool's instructions sign for it.
#[account]
#[derive(Debug, Default)]
pub struct LiquidityLocker {
    /// The owning pool
    pub pool: Pubkey,
    /// Mint of the custodied asset
    pub asset: Pubkey,
    /// Token account PDA holding the asset
    pub vault: Pubkey,
    /// Sub-factory the locker was created under
    pub locker_factory: Pubkey,
    /// PDA bump seed
    pub bump: u8,
    /// Vault bump seed
    pub vault_bump: u8,
}

impl LiquidityLocker {
    pub const SIZE: usize = 8  // discriminator
        + 32   // pool
        + 32   // asset
        + 32   // vault
        + 32   // locker_factory
        + 1    // bump
        + 1;   // vault_bump
}
