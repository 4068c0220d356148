use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PoolError;
use crate::events::{AllowList, AllowListUpdated, FactoryGlobalsSet, FactoryPauseSet, LedgerEvent};
use crate::registry::Registry;
use crate::state::{set_member, LedgerCall, PoolTerms};

/// Creates pools and their lockers for approved pool delegates.
#[account]
#[derive(Debug, Default)]
pub struct PoolFactory {
    /// Registry consulted on every creation
    pub globals: Pubkey,
    /// Governor of `globals`
    pub governor: Pubkey,
    pub paused: bool,
    /// Operators allowed to pause the factory
    pub factory_admins: Vec<Pubkey>,
    /// Number of pools created so far
    pub pools_created: u64,
    /// Reserved for future upgrades
    pub _reserved: [u8; 32],
}

impl PoolFactory {
    pub const SIZE: usize = 8  // discriminator
        + 32   // globals
        + 32   // governor
        + 1    // paused
        + 4 + 32 * MAX_FACTORY_ADMINS
        + 8    // pools_created
        + 32;  // _reserved

    pub fn initialize(&mut self, globals: Pubkey, governor: Pubkey) {
        self.globals = globals;
        self.governor = governor;
        self.paused = false;
        self.factory_admins = Vec::new();
        self.pools_created = 0;
    }

    fn only_governor(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.governor, PoolError::NotAuthorized);
        Ok(())
    }

    /// Pause or unpause pool creation.
    pub fn set_paused(&mut self, call: LedgerCall, paused: bool) -> Result<Vec<LedgerEvent>> {
        require!(
            call.caller == self.governor || self.factory_admins.contains(&call.caller),
            PoolError::NotAuthorized
        );

        self.paused = paused;
        Ok(vec![LedgerEvent::FactoryPauseSet(FactoryPauseSet {
            factory: call.target,
            paused,
        })])
    }

    pub fn set_pool_factory_admin(
        &mut self,
        call: LedgerCall,
        admin: Pubkey,
        allowed: bool,
    ) -> Result<Vec<LedgerEvent>> {
        self.only_governor(&call.caller)?;
        require_keys_neq!(admin, Pubkey::default(), PoolError::ZeroAddress);
        set_member(&mut self.factory_admins, admin, allowed, MAX_FACTORY_ADMINS)?;

        Ok(vec![LedgerEvent::AllowListUpdated(AllowListUpdated {
            owner: call.target,
            list: AllowList::FactoryAdmin,
            key: admin,
            allowed,
        })])
    }

    /// Point the factory at another registry run by the same governor.
    pub fn set_globals(
        &mut self,
        call: LedgerCall,
        globals: Pubkey,
        globals_governor: Pubkey,
    ) -> Result<Vec<LedgerEvent>> {
        self.only_governor(&call.caller)?;
        require_keys_neq!(globals, Pubkey::default(), PoolError::ZeroAddress);
        require_keys_eq!(globals_governor, self.governor, PoolError::InvalidGlobals);

        self.globals = globals;
        Ok(vec![LedgerEvent::FactoryGlobalsSet(FactoryGlobalsSet {
            factory: call.target,
            globals,
        })])
    }

    /// Check every creation argument against the registry.
    ///
    /// `call.target` is the factory itself; the caller becomes the pool
    /// delegate.
    pub fn validate_create(
        &self,
        call: LedgerCall,
        registry: &impl Registry,
        pool_id: &str,
        asset: &Pubkey,
        locker_factory: &Pubkey,
        terms: &PoolTerms,
    ) -> Result<()> {
        require!(!self.paused, PoolError::FactoryPaused);
        require!(!registry.protocol_paused(), PoolError::ProtocolPaused);
        require!(
            registry.is_valid_pool_delegate(&call.caller),
            PoolError::NotAllowListed
        );
        require!(
            registry.is_valid_pool_factory(&call.target),
            PoolError::InvalidFactory
        );
        require_keys_neq!(*asset, Pubkey::default(), PoolError::ZeroAddress);
        require_keys_neq!(*locker_factory, Pubkey::default(), PoolError::ZeroAddress);
        require!(
            registry.is_valid_sub_factory(&call.target, locker_factory, LOCKER_FACTORY),
            PoolError::InvalidSubFactory
        );
        require!(
            registry.is_liquidity_asset_approved(asset),
            PoolError::AssetNotApproved
        );
        require!(
            !pool_id.is_empty() && pool_id.len() <= MAX_POOL_ID_LEN,
            PoolError::InvalidPoolId
        );
        terms.validate()
    }

    pub fn record_pool_created(&mut self) -> Result<()> {
        self.pools_created = self
            .pools_created
            .checked_add(1)
            .ok_or(PoolError::MathOverflow)?;
        Ok(())
    }
}
