use anchor_lang::prelude::*;

use crate::state::PoolState;

// ─── REGISTRY ───────────────────────────────────────────────────

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolPauseSet {
    pub globals: Pubkey,
    pub paused: bool,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalAdminSet {
    pub globals: Pubkey,
    pub global_admin: Pubkey,
}

/// Which registry list an `AllowListUpdated` refers to
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AllowList {
    PoolFactory = 0,
    SubFactory = 1,
    PoolDelegate = 2,
    LiquidityAsset = 3,
    FactoryAdmin = 4,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowListUpdated {
    pub owner: Pubkey,
    pub list: AllowList,
    pub key: Pubkey,
    pub allowed: bool,
}

// ─── FACTORY ────────────────────────────────────────────────────

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryPauseSet {
    pub factory: Pubkey,
    pub paused: bool,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryGlobalsSet {
    pub factory: Pubkey,
    pub globals: Pubkey,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolCreated {
    pub factory: Pubkey,
    pub pool: Pubkey,
    pub pool_id: String,
    pub delegate: Pubkey,
    pub asset: Pubkey,
    pub locker: Pubkey,
    pub pool_size: u64,
    pub min_investment: u64,
    pub cooldown_period: i64,
}

// ─── POOL ───────────────────────────────────────────────────────

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceUpdated {
    pub pool: Pubkey,
    pub investor: Pubkey,
    pub shares: u64,
    pub total_deposited: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoolDown {
    pub pool: Pubkey,
    pub investor: Pubkey,
    pub amount: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Withdrawal {
    pub pool: Pubkey,
    pub investor: Pubkey,
    pub amount: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drawdown {
    pub pool: Pubkey,
    pub borrower: Pubkey,
    pub amount: u64,
    pub principal_out: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    pub pool: Pubkey,
    pub borrower: Pubkey,
    pub principal_portion: u64,
    pub interest_portion: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FundsWithdrawn {
    pub pool: Pubkey,
    pub investor: Pubkey,
    pub amount: u64,
    pub total_withdrawn: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolStateChanged {
    pub pool: Pubkey,
    pub state: PoolState,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BorrowerSet {
    pub pool: Pubkey,
    pub borrower: Pubkey,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolAdminSet {
    pub pool: Pubkey,
    pub admin: Pubkey,
    pub allowed: bool,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenToPublicSet {
    pub pool: Pubkey,
    pub open: bool,
}

/// A structured record produced by a ledger operation.
///
/// State methods return these in the order they happened; handlers
/// publish them with [`emit_all`] once the token movements are done.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerEvent {
    ProtocolPauseSet(ProtocolPauseSet),
    GlobalAdminSet(GlobalAdminSet),
    AllowListUpdated(AllowListUpdated),
    FactoryPauseSet(FactoryPauseSet),
    FactoryGlobalsSet(FactoryGlobalsSet),
    PoolCreated(PoolCreated),
    BalanceUpdated(BalanceUpdated),
    CoolDown(CoolDown),
    Withdrawal(Withdrawal),
    Drawdown(Drawdown),
    Payment(Payment),
    FundsWithdrawn(FundsWithdrawn),
    PoolStateChanged(PoolStateChanged),
    BorrowerSet(BorrowerSet),
    PoolAdminSet(PoolAdminSet),
    OpenToPublicSet(OpenToPublicSet),
}

impl LedgerEvent {
    pub fn emit(self) {
        match self {
            LedgerEvent::ProtocolPauseSet(e) => emit!(e),
            LedgerEvent::GlobalAdminSet(e) => emit!(e),
            LedgerEvent::AllowListUpdated(e) => emit!(e),
            LedgerEvent::FactoryPauseSet(e) => emit!(e),
            LedgerEvent::FactoryGlobalsSet(e) => emit!(e),
            LedgerEvent::PoolCreated(e) => emit!(e),
            LedgerEvent::BalanceUpdated(e) => emit!(e),
            LedgerEvent::CoolDown(e) => emit!(e),
            LedgerEvent::Withdrawal(e) => emit!(e),
            LedgerEvent::Drawdown(e) => emit!(e),
            LedgerEvent::Payment(e) => emit!(e),
            LedgerEvent::FundsWithdrawn(e) => emit!(e),
            LedgerEvent::PoolStateChanged(e) => emit!(e),
            LedgerEvent::BorrowerSet(e) => emit!(e),
            LedgerEvent::PoolAdminSet(e) => emit!(e),
            LedgerEvent::OpenToPublicSet(e) => emit!(e),
        }
    }
}

pub fn emit_all(events: Vec<LedgerEvent>) {
    for event in events {
        event.emit();
    }
}
