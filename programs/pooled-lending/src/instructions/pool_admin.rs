use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PoolError;
use crate::events::emit_all;
use crate::state::{Globals, LedgerCall, Pool, PoolFactory};

#[derive(Accounts)]
pub struct PoolAdmin<'info> {
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

    pub admin: Signer<'info>,
}

impl<'info> PoolAdmin<'info> {
    fn call(&self) -> Result<LedgerCall> {
        Ok(LedgerCall::new(
            self.pool.key(),
            self.admin.key(),
            Clock::get()?.unix_timestamp,
        ))
    }
}

pub fn handle_finalize(ctx: Context<PoolAdmin>) -> Result<()> {
    let call = ctx.accounts.call()?;
    let registry: &Globals = &ctx.accounts.globals;
    let events = ctx.accounts.pool.finalize(call, registry)?;
    emit_all(events);

    msg!("Pool {} finalized", call.target);

    Ok(())
}

pub fn handle_deactivate(ctx: Context<PoolAdmin>) -> Result<()> {
    let call = ctx.accounts.call()?;
    let registry: &Globals = &ctx.accounts.globals;
    let events = ctx.accounts.pool.deactivate(call, registry)?;
    emit_all(events);

    msg!("Pool {} deactivated", call.target);

    Ok(())
}

pub fn handle_set_borrower(ctx: Context<PoolAdmin>, borrower: Pubkey) -> Result<()> {
    let call = ctx.accounts.call()?;
    let registry: &Globals = &ctx.accounts.globals;
    let events = ctx.accounts.pool.set_borrower(call, registry, borrower)?;
    emit_all(events);
    Ok(())
}

pub fn handle_set_pool_admin(ctx: Context<PoolAdmin>, admin: Pubkey, allowed: bool) -> Result<()> {
    let call = ctx.accounts.call()?;
    let registry: &Globals = &ctx.accounts.globals;
    let events = ctx
        .accounts
        .pool
        .set_pool_admin(call, registry, admin, allowed)?;
    emit_all(events);
    Ok(())
}

pub fn handle_set_open_to_public(ctx: Context<PoolAdmin>, open: bool) -> Result<()> {
    let call = ctx.accounts.call()?;
    let registry: &Globals = &ctx.accounts.globals;
    let events = ctx.accounts.pool.set_open_to_public(call, registry, open)?;
    emit_all(events);
    Ok(())
}
