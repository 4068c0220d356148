use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod registry;
pub mod state;

use instructions::*;
use state::{PoolState, PoolTerms};

declare_id!("9Ucq3YtaVgqGbyr4h6wqAJbQWNGyqrbJsDuTDm3R1Xyx");

#[program]
pub mod pooled_lending {
    use super::*;

    // ─── REGISTRY ───────────────────────────────────────────────────

    pub fn initialize_globals(ctx: Context<InitializeGlobals>, global_admin: Pubkey) -> Result<()> {
        instructions::initialize_globals::handle_initialize_globals(ctx, global_admin)
    }

    pub fn set_protocol_pause(ctx: Context<UpdateGlobals>, paused: bool) -> Result<()> {
        instructions::update_globals::handle_set_protocol_pause(ctx, paused)
    }

    pub fn set_global_admin(ctx: Context<UpdateGlobals>, global_admin: Pubkey) -> Result<()> {
        instructions::update_globals::handle_set_global_admin(ctx, global_admin)
    }

    pub fn set_valid_pool_factory(ctx: Context<UpdateGlobals>, factory: Pubkey, valid: bool) -> Result<()> {
        instructions::update_globals::handle_set_valid_pool_factory(ctx, factory, valid)
    }

    pub fn set_valid_sub_factory(
        ctx: Context<UpdateGlobals>,
        factory: Pubkey,
        sub_factory: Pubkey,
        kind: u8,
        valid: bool,
    ) -> Result<()> {
        instructions::update_globals::handle_set_valid_sub_factory(ctx, factory, sub_factory, kind, valid)
    }

    pub fn set_pool_delegate_allow_list(ctx: Context<UpdateGlobals>, delegate: Pubkey, valid: bool) -> Result<()> {
        instructions::update_globals::handle_set_pool_delegate_allow_list(ctx, delegate, valid)
    }

    pub fn set_liquidity_asset(ctx: Context<UpdateGlobals>, asset: Pubkey, valid: bool) -> Result<()> {
        instructions::update_globals::handle_set_liquidity_asset(ctx, asset, valid)
    }

    // ─── FACTORY ────────────────────────────────────────────────────

    pub fn initialize_factory(ctx: Context<InitializeFactory>) -> Result<()> {
        instructions::initialize_factory::handle_initialize_factory(ctx)
    }

    pub fn set_factory_paused(ctx: Context<UpdateFactory>, paused: bool) -> Result<()> {
        instructions::update_factory::handle_set_factory_paused(ctx, paused)
    }

    pub fn set_pool_factory_admin(ctx: Context<UpdateFactory>, admin: Pubkey, allowed: bool) -> Result<()> {
        instructions::update_factory::handle_set_pool_factory_admin(ctx, admin, allowed)
    }

    pub fn set_factory_globals(ctx: Context<SetFactoryGlobals>) -> Result<()> {
        instructions::update_factory::handle_set_factory_globals(ctx)
    }

    /// Create a pool and its liquidity locker.
    /// The signer must be an approved pool delegate and becomes the pool's delegate.
    pub fn create_pool(
        ctx: Context<CreatePool>,
        pool_id: String,
        locker_factory: Pubkey,
        terms: PoolTerms,
    ) -> Result<()> {
        instructions::create_pool::handle_create_pool(ctx, pool_id, locker_factory, terms)
    }

    // ─── POOL ADMINISTRATION ────────────────────────────────────────

    pub fn finalize(ctx: Context<PoolAdmin>) -> Result<()> {
        instructions::pool_admin::handle_finalize(ctx)
    }

    pub fn deactivate(ctx: Context<PoolAdmin>) -> Result<()> {
        instructions::pool_admin::handle_deactivate(ctx)
    }

    pub fn set_borrower(ctx: Context<PoolAdmin>, borrower: Pubkey) -> Result<()> {
        instructions::pool_admin::handle_set_borrower(ctx, borrower)
    }

    pub fn set_pool_admin(ctx: Context<PoolAdmin>, admin: Pubkey, allowed: bool) -> Result<()> {
        instructions::pool_admin::handle_set_pool_admin(ctx, admin, allowed)
    }

    pub fn set_open_to_public(ctx: Context<PoolAdmin>, open: bool) -> Result<()> {
        instructions::pool_admin::handle_set_open_to_public(ctx, open)
    }

    // ─── INVESTORS ──────────────────────────────────────────────────

    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handle_deposit(ctx, amount)
    }

    pub fn withdraw(ctx: Context<InvestorRelease>, amount: u64) -> Result<()> {
        instructions::withdraw::handle_withdraw(ctx, amount)
    }

    pub fn withdraw_funds(ctx: Context<InvestorRelease>) -> Result<()> {
        instructions::withdraw_funds::handle_withdraw_funds(ctx)
    }

    pub fn withdraw_funds_amount(ctx: Context<InvestorRelease>, amount: u64) -> Result<()> {
        instructions::withdraw_funds::handle_withdraw_funds_amount(ctx, amount)
    }

    // ─── BORROWER ───────────────────────────────────────────────────

    pub fn drawdown(ctx: Context<BorrowerAction>, amount: u64) -> Result<()> {
        instructions::borrower::handle_drawdown(ctx, amount)
    }

    pub fn make_payment(ctx: Context<BorrowerAction>, amount: u64) -> Result<()> {
        instructions::borrower::handle_make_payment(ctx, amount)
    }

    // ─── VIEWS ──────────────────────────────────────────────────────

    pub fn is_deposit_allowed(ctx: Context<PoolView>, investor: Pubkey, amount: u64) -> Result<bool> {
        instructions::views::handle_is_deposit_allowed(ctx, investor, amount)
    }

    pub fn get_pool_state(ctx: Context<PoolView>) -> Result<PoolState> {
        instructions::views::handle_get_pool_state(ctx)
    }

    pub fn locker_balance(ctx: Context<LockerView>) -> Result<u64> {
        instructions::views::handle_locker_balance(ctx)
    }

    pub fn can_withdraw(ctx: Context<PositionView>, amount: u64) -> Result<bool> {
        instructions::views::handle_can_withdraw(ctx, amount)
    }

    pub fn withdrawable_of(ctx: Context<PositionView>) -> Result<u64> {
        instructions::views::handle_withdrawable_of(ctx)
    }

    pub fn withdrawable_funds_of(ctx: Context<PositionView>) -> Result<u64> {
        instructions::views::handle_withdrawable_funds_of(ctx)
    }
}
