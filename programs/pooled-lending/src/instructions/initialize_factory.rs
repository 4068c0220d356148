use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PoolError;
use crate::state::{Globals, PoolFactory};

#[derive(Accounts)]
pub struct InitializeFactory<'info> {
    /// Fresh keypair account; must sign the transaction
    #[account(
        init,
        payer = governor,
        space = PoolFactory::SIZE,
    )]
    pub factory: Account<'info, PoolFactory>,

    #[account(
        seeds = [GLOBALS_SEED, globals.governor.as_ref()],
        bump = globals.bump,
        constraint = globals.governor == governor.key() @ PoolError::NotAuthorized,
    )]
    pub globals: Account<'info, Globals>,

    #[account(mut)]
    pub governor: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_initialize_factory(ctx: Context<InitializeFactory>) -> Result<()> {
    let globals = ctx.accounts.globals.key();
    let governor = ctx.accounts.governor.key();
    ctx.accounts.factory.initialize(globals, governor);

    msg!("Pool factory {} bound to registry {}", ctx.accounts.factory.key(), globals);

    Ok(())
}
