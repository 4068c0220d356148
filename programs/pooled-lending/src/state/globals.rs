use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PoolError;
use crate::events::{AllowList, AllowListUpdated, GlobalAdminSet, LedgerEvent, ProtocolPauseSet};
use crate::registry::Registry;
use crate::state::{set_member, LedgerCall};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubFactory {
    pub factory: Pubkey,
    pub sub_factory: Pubkey,
    pub kind: u8,
}

impl SubFactory {
    pub const SIZE: usize = 32 + 32 + 1;
}

/// Protocol registry.
///
/// Seeds: ["globals", governor]
/// Allow-lists pool delegates, liquidity assets, pool factories and their
/// sub-factories, and carries the protocol-wide pause flag.
#[account]
#[derive(Debug, Default)]
pub struct Globals {
    /// Owner of every allow-list
    pub governor: Pubkey,
    /// Operator who may pause the protocol
    pub global_admin: Pubkey,
    pub protocol_paused: bool,
    pub valid_pool_factories: Vec<Pubkey>,
    pub valid_sub_factories: Vec<SubFactory>,
    pub pool_delegates: Vec<Pubkey>,
    pub liquidity_assets: Vec<Pubkey>,
    /// PDA bump seed
    pub bump: u8,
    /// Reserved for future upgrades
    pub _reserved: [u8; 32],
}

impl Globals {
    pub const SIZE: usize = 8  // discriminator
        + 32   // governor
        + 32   // global_admin
        + 1    // protocol_paused
        + 4 + 32 * MAX_POOL_FACTORIES
        + 4 + SubFactory::SIZE * MAX_SUB_FACTORIES
        + 4 + 32 * MAX_POOL_DELEGATES
        + 4 + 32 * MAX_LIQUIDITY_ASSETS
        + 1    // bump
        + 32;  // _reserved

    pub fn initialize(&mut self, governor: Pubkey, global_admin: Pubkey, bump: u8) -> Result<()> {
        require_keys_neq!(global_admin, Pubkey::default(), PoolError::ZeroAddress);

        self.governor = governor;
        self.global_admin = global_admin;
        self.protocol_paused = false;
        self.valid_pool_factories = Vec::new();
        self.valid_sub_factories = Vec::new();
        self.pool_delegates = Vec::new();
        self.liquidity_assets = Vec::new();
        self.bump = bump;
        Ok(())
    }

    fn only_governor(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.governor, PoolError::NotAuthorized);
        Ok(())
    }

    pub fn set_protocol_pause(&mut self, call: LedgerCall, paused: bool) -> Result<Vec<LedgerEvent>> {
        require_keys_eq!(call.caller, self.global_admin, PoolError::NotAuthorized);

        self.protocol_paused = paused;

        Ok(vec![LedgerEvent::ProtocolPauseSet(ProtocolPauseSet {
            globals: call.target,
            paused,
        })])
    }

    pub fn set_global_admin(&mut self, call: LedgerCall, new_admin: Pubkey) -> Result<Vec<LedgerEvent>> {
        require!(
            call.caller == self.governor || call.caller == self.global_admin,
            PoolError::NotAuthorized
        );
        require!(!self.protocol_paused, PoolError::ProtocolPaused);
        require_keys_neq!(new_admin, Pubkey::default(), PoolError::ZeroAddress);

        self.global_admin = new_admin;

        Ok(vec![LedgerEvent::GlobalAdminSet(GlobalAdminSet {
            globals: call.target,
            global_admin: new_admin,
        })])
    }

    pub fn set_valid_pool_factory(
        &mut self,
        call: LedgerCall,
        factory: Pubkey,
        valid: bool,
    ) -> Result<Vec<LedgerEvent>> {
        self.only_governor(&call.caller)?;
        require_keys_neq!(factory, Pubkey::default(), PoolError::ZeroAddress);
        set_member(&mut self.valid_pool_factories, factory, valid, MAX_POOL_FACTORIES)?;
        Ok(vec![allow_list_updated(call, AllowList::PoolFactory, factory, valid)])
    }

    pub fn set_valid_sub_factory(
        &mut self,
        call: LedgerCall,
        factory: Pubkey,
        sub_factory: Pubkey,
        kind: u8,
        valid: bool,
    ) -> Result<Vec<LedgerEvent>> {
        self.only_governor(&call.caller)?;
        require_keys_neq!(factory, Pubkey::default(), PoolError::ZeroAddress);
        require_keys_neq!(sub_factory, Pubkey::default(), PoolError::ZeroAddress);

        let entry = SubFactory { factory, sub_factory, kind };
        set_member(&mut self.valid_sub_factories, entry, valid, MAX_SUB_FACTORIES)?;

        Ok(vec![allow_list_updated(call, AllowList::SubFactory, sub_factory, valid)])
    }

    pub fn set_pool_delegate_allow_list(
        &mut self,
        call: LedgerCall,
        delegate: Pubkey,
        valid: bool,
    ) -> Result<Vec<LedgerEvent>> {
        self.only_governor(&call.caller)?;
        require_keys_neq!(delegate, Pubkey::default(), PoolError::ZeroAddress);
        set_member(&mut self.pool_delegates, delegate, valid, MAX_POOL_DELEGATES)?;
        Ok(vec![allow_list_updated(call, AllowList::PoolDelegate, delegate, valid)])
    }

    pub fn set_liquidity_asset(
        &mut self,
        call: LedgerCall,
        asset: Pubkey,
        valid: bool,
    ) -> Result<Vec<LedgerEvent>> {
        self.only_governor(&call.caller)?;
        require_keys_neq!(asset, Pubkey::default(), PoolError::ZeroAddress);
        set_member(&mut self.liquidity_assets, asset, valid, MAX_LIQUIDITY_ASSETS)?;
        Ok(vec![allow_list_updated(call, AllowList::LiquidityAsset, asset, valid)])
    }
}

fn allow_list_updated(call: LedgerCall, list: AllowList, key: Pubkey, allowed: bool) -> LedgerEvent {
    LedgerEvent::AllowListUpdated(AllowListUpdated {
        owner: call.target,
        list,
        key,
        allowed,
    })
}

impl Registry for Globals {
    fn is_valid_pool_delegate(&self, delegate: &Pubkey) -> bool {
        self.pool_delegates.contains(delegate)
    }

    fn is_valid_pool_factory(&self, factory: &Pubkey) -> bool {
        self.valid_pool_factories.contains(factory)
    }

    fn is_valid_sub_factory(&self, factory: &Pubkey, sub_factory: &Pubkey, kind: u8) -> bool {
        self.valid_sub_factories
            .iter()
            .any(|e| e.factory == *factory && e.sub_factory == *sub_factory && e.kind == kind)
    }

    fn is_liquidity_asset_approved(&self, asset: &Pubkey) -> bool {
        self.liquidity_assets.contains(asset)
    }

    fn protocol_paused(&self) -> bool {
        self.protocol_paused
    }
}
