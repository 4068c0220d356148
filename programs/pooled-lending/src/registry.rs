use anchor_lang::prelude::*;

/// Read-only permission queries the factory and pools make against the
/// protocol registry.
///
/// `Globals` is the on-chain implementation; tests substitute their own.
pub trait Registry {
    fn is_valid_pool_delegate(&self, delegate: &Pubkey) -> bool;

    fn is_valid_pool_factory(&self, factory: &Pubkey) -> bool;

    fn is_valid_sub_factory(&self, factory: &Pubkey, sub_factory: &Pubkey, kind: u8) -> bool;

    fn is_liquidity_asset_approved(&self, asset: &Pubkey) -> bool;

    fn protocol_paused(&self) -> bool;
}
