use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::emit_all;
use crate::state::{Globals, LedgerCall};

#[derive(Accounts)]
pub struct UpdateGlobals<'info> {
    #[account(
        mut,
        seeds = [GLOBALS_SEED, globals.governor.as_ref()],
        bump = globals.bump,
    )]
    pub globals: Account<'info, Globals>,

    pub signer: Signer<'info>,
}

impl<'info> UpdateGlobals<'info> {
    fn call(&self) -> Result<LedgerCall> {
        Ok(LedgerCall::new(
            self.globals.key(),
            self.signer.key(),
            Clock::get()?.unix_timestamp,
        ))
    }
}

pub fn handle_set_protocol_pause(ctx: Context<UpdateGlobals>, paused: bool) -> Result<()> {
    let call = ctx.accounts.call()?;
    let events = ctx.accounts.globals.set_protocol_pause(call, paused)?;
    emit_all(events);

    msg!("Protocol paused: {}", paused);

    Ok(())
}

pub fn handle_set_global_admin(ctx: Context<UpdateGlobals>, global_admin: Pubkey) -> Result<()> {
    let call = ctx.accounts.call()?;
    let events = ctx.accounts.globals.set_global_admin(call, global_admin)?;
    emit_all(events);
    Ok(())
}

pub fn handle_set_valid_pool_factory(ctx: Context<UpdateGlobals>, factory: Pubkey, valid: bool) -> Result<()> {
    let call = ctx.accounts.call()?;
    let events = ctx
        .accounts
        .globals
        .set_valid_pool_factory(call, factory, valid)?;
    emit_all(events);
    Ok(())
}

pub fn handle_set_valid_sub_factory(
    ctx: Context<UpdateGlobals>,
    factory: Pubkey,
    sub_factory: Pubkey,
    kind: u8,
    valid: bool,
) -> Result<()> {
    let call = ctx.accounts.call()?;
    let events = ctx
        .accounts
        .globals
        .set_valid_sub_factory(call, factory, sub_factory, kind, valid)?;
    emit_all(events);
    Ok(())
}

pub fn handle_set_pool_delegate_allow_list(
    ctx: Context<UpdateGlobals>,
    delegate: Pubkey,
    valid: bool,
) -> Result<()> {
    let call = ctx.accounts.call()?;
    let events = ctx
        .accounts
        .globals
        .set_pool_delegate_allow_list(call, delegate, valid)?;
    emit_all(events);
    Ok(())
}

pub fn handle_set_liquidity_asset(ctx: Context<UpdateGlobals>, asset: Pubkey, valid: bool) -> Result<()> {
    let call = ctx.accounts.call()?;
    let events = ctx.accounts.globals.set_liquidity_asset(call, asset, valid)?;
    emit_all(events);
    Ok(())
}
