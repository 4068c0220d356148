use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::errors::PoolError;
use crate::events::emit_all;
use crate::instructions::custody::pull_into_locker;
use crate::state::{Globals, InvestorPosition, LedgerCall, LiquidityLocker, Pool, PoolFactory};

#[derive(Accounts)]
pub struct Deposit<'info> {
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
        init_if_needed,
        seeds = [INVESTOR_SEED, pool.key().as_ref(), investor.key().as_ref()],
        bump,
        payer = investor,
        space = InvestorPosition::SIZE,
    )]
    pub position: Box<Account<'info, InvestorPosition>>,

    #[account(
        mut,
        constraint = investor_token_account.mint == pool.asset @ PoolError::MintMismatch,
    )]
    pub investor_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub investor: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handle_deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let call = LedgerCall::new(
        ctx.accounts.pool.key(),
        ctx.accounts.investor.key(),
        Clock::get()?.unix_timestamp,
    );
    let fresh = !ctx.accounts.position.is_open();

    let registry: &Globals = &ctx.accounts.globals;
    let events = ctx
        .accounts
        .pool
        .deposit(call, registry, &mut ctx.accounts.position, amount)?;
    if fresh {
        ctx.accounts.position.bump = ctx.bumps.position;
    }

    pull_into_locker(
        &ctx.accounts.token_program,
        &ctx.accounts.investor_token_account,
        &ctx.accounts.vault,
        &ctx.accounts.investor,
        amount,
    )?;

    emit_all(events);

    Ok(())
}
