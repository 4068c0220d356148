use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::PoolError;
use crate::events::{LedgerEvent, PoolCreated};
use crate::state::{Globals, LedgerCall, LiquidityLocker, Pool, PoolFactory, PoolTerms};

#[derive(Accounts)]
#[instruction(pool_id: String)]
pub struct CreatePool<'info> {
    #[account(
        mut,
        constraint = factory.globals == globals.key() @ PoolError::InvalidGlobals,
    )]
    pub factory: Box<Account<'info, PoolFactory>>,

    #[account(
        seeds = [GLOBALS_SEED, globals.governor.as_ref()],
        bump = globals.bump,
    )]
    pub globals: Box<Account<'info, Globals>>,

    #[account(
        init,
        seeds = [POOL_SEED, factory.key().as_ref(), pool_id.as_bytes()],
        bump,
        payer = delegate,
        space = Pool::SIZE,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        init,
        seeds = [LOCKER_SEED, pool.key().as_ref()],
        bump,
        payer = delegate,
        space = LiquidityLocker::SIZE,
    )]
    pub locker: Box<Account<'info, LiquidityLocker>>,

    #[account(
        init,
        seeds = [LOCKER_VAULT_SEED, locker.key().as_ref()],
        bump,
        payer = delegate,
        token::mint = asset,
        token::authority = locker,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub asset: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub delegate: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handle_create_pool(
    ctx: Context<CreatePool>,
    pool_id: String,
    locker_factory: Pubkey,
    terms: PoolTerms,
) -> Result<()> {
    let factory_key = ctx.accounts.factory.key();
    let pool_key = ctx.accounts.pool.key();
    let locker_key = ctx.accounts.locker.key();
    let asset_key = ctx.accounts.asset.key();
    let delegate = ctx.accounts.delegate.key();

    let call = LedgerCall::new(factory_key, delegate, Clock::get()?.unix_timestamp);
    let registry: &Globals = &ctx.accounts.globals;
    ctx.accounts.factory.validate_create(
        call,
        registry,
        &pool_id,
        &asset_key,
        &locker_factory,
        &terms,
    )?;

    let locker = &mut ctx.accounts.locker;
    locker.pool = pool_key;
    locker.asset = asset_key;
    locker.vault = ctx.accounts.vault.key();
    locker.locker_factory = locker_factory;
    locker.bump = ctx.bumps.locker;
    locker.vault_bump = ctx.bumps.vault;

    ctx.accounts.pool.initialize(
        factory_key,
        pool_id.clone(),
        delegate,
        asset_key,
        locker_key,
        ctx.accounts.asset.decimals,
        terms,
        ctx.bumps.pool,
    );
    ctx.accounts.factory.record_pool_created()?;

    LedgerEvent::PoolCreated(PoolCreated {
        factory: factory_key,
        pool: pool_key,
        pool_id,
        delegate,
        asset: asset_key,
        locker: locker_key,
        pool_size: terms.pool_size,
        min_investment: terms.min_investment,
        cooldown_period: terms.cooldown_period,
    })
    .emit();

    Ok(())
}
