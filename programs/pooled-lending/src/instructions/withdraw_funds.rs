use anchor_lang::prelude::*;

use crate::events::emit_all;
use crate::instructions::withdraw::InvestorRelease;
use crate::state::Globals;

pub fn handle_withdraw_funds(ctx: Context<InvestorRelease>) -> Result<()> {
    let call = ctx.accounts.call()?;
    let registry: &Globals = &ctx.accounts.globals;
    let (amount, events) = ctx
        .accounts
        .pool
        .withdraw_funds(call, registry, &mut ctx.accounts.position)?;

    ctx.accounts.release(amount)?;

    emit_all(events);

    msg!("Claimed {} interest", amount);

    Ok(())
}

pub fn handle_withdraw_funds_amount(ctx: Context<InvestorRelease>, amount: u64) -> Result<()> {
    let call = ctx.accounts.call()?;
    let registry: &Globals = &ctx.accounts.globals;
    let events = ctx
        .accounts
        .pool
        .withdraw_funds_amount(call, registry, &mut ctx.accounts.position, amount)?;

    ctx.accounts.release(amount)?;

    emit_all(events);

    Ok(())
}
