use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::*;
use crate::errors::PoolError;
use crate::state::{Globals, InvestorPosition, LiquidityLocker, Pool, PoolFactory, PoolState};

#[derive(Accounts)]
pub struct PoolView<'info> {
    #[account(
        seeds = [POOL_SEED, pool.factory.as_ref(), pool.pool_id.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        constraint = factory.key() == pool.factory @ PoolError::InvalidFactory,
        constraint = factory.globals == globals.key() @ PoolError::InvalidGlobals,
    )]
    pub factory: Box<Account<'info, PoolFactory>>,

    pub globals: Box<Account<'info, Globals>>,
}

#[derive(Accounts)]
pub struct PositionView<'info> {
    #[account(
        seeds = [POOL_SEED, pool.factory.as_ref(), pool.pool_id.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        seeds = [INVESTOR_SEED, pool.key().as_ref(), position.investor.as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, InvestorPosition>>,
}

#[derive(Accounts)]
pub struct LockerView<'info> {
    #[account(has_one = vault @ PoolError::InvalidVault)]
    pub locker: Box<Account<'info, LiquidityLocker>>,

    pub vault: Box<Account<'info, TokenAccount>>,
}

pub fn handle_locker_balance(ctx: Context<LockerView>) -> Result<u64> {
    Ok(ctx.accounts.vault.amount)
}

pub fn handle_is_deposit_allowed(ctx: Context<PoolView>, investor: Pubkey, amount: u64) -> Result<bool> {
    let registry: &Globals = &ctx.accounts.globals;
    Ok(ctx.accounts.pool.is_deposit_allowed(&investor, amount, registry))
}

pub fn handle_get_pool_state(ctx: Context<PoolView>) -> Result<PoolState> {
    Ok(ctx.accounts.pool.state)
}

pub fn handle_can_withdraw(ctx: Context<PositionView>, amount: u64) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts
        .pool
        .can_withdraw(&ctx.accounts.position, amount, now)
}

pub fn handle_withdrawable_of(ctx: Context<PositionView>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.pool.withdrawable_of(&ctx.accounts.position, now))
}

pub fn handle_withdrawable_funds_of(ctx: Context<PositionView>) -> Result<u64> {
    ctx.accounts.pool.withdrawable_funds_of(&ctx.accounts.position)
}
