use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::errors::PoolError;
use crate::events::emit_all;
use crate::instructions::custody::{pull_into_locker, release_from_locker};
use crate::state::{Globals, LedgerCall, LiquidityLocker, Pool, PoolFactory};

#[derive(Accounts)]
pub struct BorrowerAction<'info> {
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
        constraint = borrower_token_account.mint == pool.asset @ PoolError::MintMismatch,
    )]
    pub borrower_token_account: Box<Account<'info, TokenAccount>>,

    pub borrower: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

impl<'info> BorrowerAction<'info> {
    fn call(&self) -> Result<LedgerCall> {
        Ok(LedgerCall::new(
            self.pool.key(),
            self.borrower.key(),
            Clock::get()?.unix_timestamp,
        ))
    }
}

pub fn handle_drawdown(ctx: Context<BorrowerAction>, amount: u64) -> Result<()> {
    let call = ctx.accounts.call()?;
    let registry: &Globals = &ctx.accounts.globals;
    let events = ctx.accounts.pool.drawdown(call, registry, amount)?;

    release_from_locker(
        &ctx.accounts.token_program,
        &ctx.accounts.locker,
        &ctx.accounts.vault,
        &ctx.accounts.borrower_token_account,
        amount,
    )?;

    emit_all(events);

    msg!("Drawdown {}, principal out {}", amount, ctx.accounts.pool.principal_out);

    Ok(())
}

pub fn handle_make_payment(ctx: Context<BorrowerAction>, amount: u64) -> Result<()> {
    let call = ctx.accounts.call()?;
    let registry: &Globals = &ctx.accounts.globals;
    let events = ctx.accounts.pool.make_payment(call, registry, amount)?;

    pull_into_locker(
        &ctx.accounts.token_program,
        &ctx.accounts.borrower_token_account,
        &ctx.accounts.vault,
        &ctx.accounts.borrower,
        amount,
    )?;

    emit_all(events);

    Ok(())
}
