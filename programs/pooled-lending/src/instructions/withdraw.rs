use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::errors::PoolError;
use crate::events::emit_all;
use crate::instructions::custody::release_from_locker;
use crate::state::{Globals, InvestorPosition, LedgerCall, LiquidityLocker, Pool, PoolFactory};

/// Accounts for moving funds from the locker back to an investor:
/// principal withdrawals and interest claims.
#[derive(Accounts)]
pub struct InvestorRelease<'info> {
    #[account(
        mut,
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

    #[account(
        has_one = pool @ PoolError::InvalidVault,
        has_one = vault @ PoolError::InvalidVault,
    )]
    pub locker: Box<Account<'info, LiquidityLocker>>,

    #[account(mut)]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [INVESTOR_SEED, pool.key().as_ref(), investor.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, InvestorPosition>>,

    #[account(
        mut,
        constraint = investor_token_account.mint == pool.asset @ PoolError::MintMismatch,
    )]
    pub investor_token_account: Box<Account<'info, TokenAccount>>,

    pub investor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

impl<'info> InvestorRelease<'info> {
    pub fn call(&self) -> Result<LedgerCall> {
        Ok(LedgerCall::new(
            self.pool.key(),
            self.investor.key(),
            Clock::get()?.unix_timestamp,
        ))
    }

    pub fn release(&self, amount: u64) -> Result<()> {
        release_from_locker(
            &self.token_program,
            &self.locker,
            &self.vault,
            &self.investor_token_account,
            amount,
        )
    }
}

pub fn handle_withdraw(ctx: Context<InvestorRelease>, amount: u64) -> Result<()> {
    let call = ctx.accounts.call()?;
    let registry: &Globals = &ctx.accounts.globals;
    let events = ctx
        .accounts
        .pool
        .withdraw(call, registry, &mut ctx.accounts.position, amount)?;

    ctx.accounts.release(amount)?;

    emit_all(events);

    Ok(())
}
