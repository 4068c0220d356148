use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::state::LiquidityLocker;

/// Move `amount` from a signer's token account into a locker vault.
pub fn pull_into_locker<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    vault: &Account<'info, TokenAccount>,
    authority: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    token::transfer(
        CpiContext::new(
            token_program.to_account_info(),
            Transfer {
                from: from.to_account_info(),
                to: vault.to_account_info(),
                authority: authority.to_account_info(),
            },
        ),
        amount,
    )
}

/// Release `amount` from a locker vault, signed by the locker PDA.
pub fn release_from_locker<'info>(
    token_program: &Program<'info, Token>,
    locker: &Account<'info, LiquidityLocker>,
    vault: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    amount: u64,
) -> Result<()> {
    let pool_key = locker.pool;
    let locker_seeds = &[LOCKER_SEED, pool_key.as_ref(), &[locker.bump]];

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: vault.to_account_info(),
                to: to.to_account_info(),
                authority: locker.to_account_info(),
            },
            &[locker_seeds],
        ),
        amount,
    )
}
