use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::emit_all;
use crate::state::{Globals, LedgerCall, PoolFactory};

#[derive(Accounts)]
pub struct UpdateFactory<'info> {
    #[account(mut)]
    pub factory: Account<'info, PoolFactory>,

    pub signer: Signer<'info>,
}

pub fn handle_set_factory_paused(ctx: Context<UpdateFactory>, paused: bool) -> Result<()> {
    let call = LedgerCall::new(
        ctx.accounts.factory.key(),
        ctx.accounts.signer.key(),
        Clock::get()?.unix_timestamp,
    );
    let events = ctx.accounts.factory.set_paused(call, paused)?;
    emit_all(events);

    msg!("Pool factory paused: {}", paused);

    Ok(())
}

pub fn handle_set_pool_factory_admin(ctx: Context<UpdateFactory>, admin: Pubkey, allowed: bool) -> Result<()> {
    let call = LedgerCall::new(
        ctx.accounts.factory.key(),
        ctx.accounts.signer.key(),
        Clock::get()?.unix_timestamp,
    );
    let events = ctx
        .accounts
        .factory
        .set_pool_factory_admin(call, admin, allowed)?;
    emit_all(events);
    Ok(())
}

#[derive(Accounts)]
pub struct SetFactoryGlobals<'info> {
    #[account(mut)]
    pub factory: Account<'info, PoolFactory>,

    #[account(
        seeds = [GLOBALS_SEED, new_globals.governor.as_ref()],
        bump = new_globals.bump,
    )]
    pub new_globals: Account<'info, Globals>,

    pub governor: Signer<'info>,
}

pub fn handle_set_factory_globals(ctx: Context<SetFactoryGlobals>) -> Result<()> {
    let call = LedgerCall::new(
        ctx.accounts.factory.key(),
        ctx.accounts.governor.key(),
        Clock::get()?.unix_timestamp,
    );
    let new_globals = ctx.accounts.new_globals.key();
    let new_governor = ctx.accounts.new_globals.governor;
    let events = ctx
        .accounts
        .factory
        .set_globals(call, new_globals, new_governor)?;
    emit_all(events);
    Ok(())
}
