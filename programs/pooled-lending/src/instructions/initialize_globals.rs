use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::Globals;

#[derive(Accounts)]
pub struct InitializeGlobals<'info> {
    #[account(
        init,
        seeds = [GLOBALS_SEED, governor.key().as_ref()],
        bump,
        payer = governor,
        space = Globals::SIZE,
    )]
    pub globals: Account<'info, Globals>,

    #[account(mut)]
    pub governor: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_initialize_globals(ctx: Context<InitializeGlobals>, global_admin: Pubkey) -> Result<()> {
    let governor = ctx.accounts.governor.key();
    ctx.accounts
        .globals
        .initialize(governor, global_admin, ctx.bumps.globals)?;

    msg!("Registry initialized, governor {}", governor);

    Ok(())
}
