use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PoolError;
use crate::events::*;
use crate::registry::Registry;
use crate::state::{set_member, InvestorPosition, LedgerCall};

/// Pool lifecycle. Transitions only move forward:
/// Initialized -> Finalized -> Deactivated.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum PoolState {
    /// Configured, not yet accepting deposits
    Initialized = 0,
    /// Fully operational
    Finalized = 1,
    /// Terminal; no new capital, existing positions can unwind
    Deactivated = 2,
}

impl Default for PoolState {
    fn default() -> Self {
        PoolState::Initialized
    }
}

/// Creation-time terms of a pool, validated by the factory.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolTerms {
    /// Seconds an investor's latest deposit must age before withdrawal
    pub cooldown_period: i64,
    /// Loan term in seconds, recorded for schedule engines
    pub duration: u64,
    /// Cap on total deposits
    pub pool_size: u64,
    /// Smallest accepted deposit
    pub min_investment: u64,
}

impl PoolTerms {
    pub fn validate(&self) -> Result<()> {
        require!(self.pool_size > 0, PoolError::InvalidPoolTerms);
        require!(self.min_investment > 0, PoolError::InvalidPoolTerms);
        require!(self.min_investment <= self.pool_size, PoolError::InvalidPoolTerms);
        require!(self.cooldown_period >= 0, PoolError::InvalidPoolTerms);
        require!(self.duration > 0, PoolError::InvalidPoolTerms);
        Ok(())
    }
}

#[account]
#[derive(Debug, Default)]
pub struct Pool {
    /// Factory that created the pool
    pub factory: Pubkey,
    /// Caller-supplied identifier, unique per factory
    pub pool_id: String,
    /// Pool delegate; always an admin
    pub delegate: Pubkey,
    /// Mint of the liquidity asset
    pub asset: Pubkey,
    /// The pool's liquidity locker
    pub locker: Pubkey,
    /// Decimals of the liquidity asset
    pub decimals: u8,
    pub state: PoolState,
    pub cooldown_period: i64,
    pub duration: u64,
    pub pool_size: u64,
    pub min_investment: u64,
    /// Whether investors outside the delegate allow-list may deposit
    pub open_to_public: bool,
    /// Active borrower, zero when unset
    pub borrower: Pubkey,
    /// Principal drawn down and not yet repaid
    pub principal_out: u64,
    /// Net principal held as deposits
    pub total_deposited: u64,
    /// Interest repaid and not yet claimed
    pub interest_pool: u64,
    /// Lifetime interest claimed by investors
    pub total_interest_claimed: u64,
    /// Cumulative interest per share, scaled by `POINTS_MULTIPLIER`
    pub points_per_share: u128,
    /// Interest repaid while no shares were outstanding
    pub undistributed_interest: u64,
    /// Admins besides the delegate
    pub pool_admins: Vec<Pubkey>,
    /// PDA bump seed
    pub bump: u8,
    /// Reserved for future upgrades
    pub _reserved: [u8; 32],
}

impl Pool {
    pub const SIZE: usize = 8  // discriminator
        + 32   // factory
        + 4 + MAX_POOL_ID_LEN
        + 32   // delegate
        + 32   // asset
        + 32   // locker
        + 1    // decimals
        + 1    // state
        + 8    // cooldown_period
        + 8    // duration
        + 8    // pool_size
        + 8    // min_investment
        + 1    // open_to_public
        + 32   // borrower
        + 8    // principal_out
        + 8    // total_deposited
        + 8    // interest_pool
        + 8    // total_interest_claimed
        + 16   // points_per_share
        + 8    // undistributed_interest
        + 4 + 32 * MAX_POOL_ADMINS
        + 1    // bump
        + 32;  // _reserved

    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        &mut self,
        factory: Pubkey,
        pool_id: String,
        delegate: Pubkey,
        asset: Pubkey,
        locker: Pubkey,
        decimals: u8,
        terms: PoolTerms,
        bump: u8,
    ) {
        self.factory = factory;
        self.pool_id = pool_id;
        self.delegate = delegate;
        self.asset = asset;
        self.locker = locker;
        self.decimals = decimals;
        self.state = PoolState::Initialized;
        self.cooldown_period = terms.cooldown_period;
        self.duration = terms.duration;
        self.pool_size = terms.pool_size;
        self.min_investment = terms.min_investment;
        self.open_to_public = false;
        self.borrower = Pubkey::default();
        self.principal_out = 0;
        self.total_deposited = 0;
        self.interest_pool = 0;
        self.total_interest_claimed = 0;
        self.points_per_share = 0;
        self.undistributed_interest = 0;
        self.pool_admins = Vec::new();
        self.bump = bump;
    }

    pub fn is_admin(&self, key: &Pubkey) -> bool {
        *key == self.delegate || self.pool_admins.contains(key)
    }

    /// Deposited capital not currently drawn down.
    pub fn available_liquidity(&self) -> u64 {
        self.total_deposited.saturating_sub(self.principal_out)
    }

    /// What the locker must hold given the ledger counters.
    pub fn expected_locker_balance(&self) -> Result<u64> {
        self.available_liquidity()
            .checked_add(self.interest_pool)
            .ok_or_else(|| error!(PoolError::MathOverflow))
    }

    fn when_protocol_not_paused(registry: &impl Registry) -> Result<()> {
        require!(!registry.protocol_paused(), PoolError::ProtocolPaused);
        Ok(())
    }

    fn only_admin(&self, caller: &Pubkey) -> Result<()> {
        require!(self.is_admin(caller), PoolError::NotAuthorized);
        Ok(())
    }

    fn only_borrower(&self, caller: &Pubkey) -> Result<()> {
        require!(
            self.borrower != Pubkey::default() && *caller == self.borrower,
            PoolError::NotAuthorized
        );
        Ok(())
    }

    fn state_changed(&self, call: LedgerCall) -> LedgerEvent {
        LedgerEvent::PoolStateChanged(PoolStateChanged {
            pool: call.target,
            state: self.state,
        })
    }

    // ─── ADMINISTRATION ─────────────────────────────────────────────

    pub fn finalize(&mut self, call: LedgerCall, registry: &impl Registry) -> Result<Vec<LedgerEvent>> {
        Self::when_protocol_not_paused(registry)?;
        self.only_admin(&call.caller)?;
        require!(self.state == PoolState::Initialized, PoolError::BadState);

        self.state = PoolState::Finalized;
        Ok(vec![self.state_changed(call)])
    }

    pub fn deactivate(&mut self, call: LedgerCall, registry: &impl Registry) -> Result<Vec<LedgerEvent>> {
        Self::when_protocol_not_paused(registry)?;
        self.only_admin(&call.caller)?;
        require!(self.state == PoolState::Finalized, PoolError::BadState);

        self.state = PoolState::Deactivated;
        Ok(vec![self.state_changed(call)])
    }

    pub fn set_borrower(
        &mut self,
        call: LedgerCall,
        registry: &impl Registry,
        borrower: Pubkey,
    ) -> Result<Vec<LedgerEvent>> {
        Self::when_protocol_not_paused(registry)?;
        self.only_admin(&call.caller)?;
        require_keys_neq!(borrower, Pubkey::default(), PoolError::ZeroAddress);

        self.borrower = borrower;
        Ok(vec![LedgerEvent::BorrowerSet(BorrowerSet {
            pool: call.target,
            borrower,
        })])
    }

    pub fn set_pool_admin(
        &mut self,
        call: LedgerCall,
        registry: &impl Registry,
        admin: Pubkey,
        allowed: bool,
    ) -> Result<Vec<LedgerEvent>> {
        Self::when_protocol_not_paused(registry)?;
        self.only_admin(&call.caller)?;
        require_keys_neq!(admin, Pubkey::default(), PoolError::ZeroAddress);
        set_member(&mut self.pool_admins, admin, allowed, MAX_POOL_ADMINS)?;

        Ok(vec![LedgerEvent::PoolAdminSet(PoolAdminSet {
            pool: call.target,
            admin,
            allowed,
        })])
    }

    pub fn set_open_to_public(
        &mut self,
        call: LedgerCall,
        registry: &impl Registry,
        open: bool,
    ) -> Result<Vec<LedgerEvent>> {
        Self::when_protocol_not_paused(registry)?;
        self.only_admin(&call.caller)?;

        self.open_to_public = open;
        Ok(vec![LedgerEvent::OpenToPublicSet(OpenToPublicSet {
            pool: call.target,
            open,
        })])
    }

    // ─── DEPOSIT ────────────────────────────────────────────────────

    fn check_deposit(&self, caller: &Pubkey, amount: u64, registry: &impl Registry) -> Result<u64> {
        Self::when_protocol_not_paused(registry)?;
        require!(self.state == PoolState::Finalized, PoolError::BadState);
        require!(
            self.open_to_public || registry.is_valid_pool_delegate(caller),
            PoolError::NotAllowListed
        );
        require!(amount > 0, PoolError::InvalidAmount);
        require!(amount >= self.min_investment, PoolError::BelowMinimum);

        let total_deposited = self
            .total_deposited
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        require!(total_deposited <= self.pool_size, PoolError::CapExceeded);

        Ok(total_deposited)
    }

    /// Whether `deposit(amount)` by `caller` would pass every ledger check.
    pub fn is_deposit_allowed(&self, caller: &Pubkey, amount: u64, registry: &impl Registry) -> bool {
        self.check_deposit(caller, amount, registry).is_ok()
    }

    /// Credit `amount` to the caller's position.
    ///
    /// Any deposit restarts the cooldown over the whole position, not only
    /// the new amount.
    pub fn deposit(
        &mut self,
        call: LedgerCall,
        registry: &impl Registry,
        position: &mut InvestorPosition,
        amount: u64,
    ) -> Result<Vec<LedgerEvent>> {
        let total_deposited = self.check_deposit(&call.caller, amount, registry)?;

        if position.is_open() {
            require_keys_eq!(position.investor, call.caller, PoolError::NotAuthorized);
            require_keys_eq!(position.pool, call.target, PoolError::NotAuthorized);
        }
        let shares = position
            .shares
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        let total_minted = position
            .total_minted
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        let points_correction = position
            .points_correction
            .checked_sub(self.points_for(amount)?)
            .ok_or(PoolError::MathOverflow)?;
        // interest repaid into an empty pool goes to whoever deposits next
        let (points_per_share, undistributed_interest) = self.accrue(0, total_deposited)?;

        if !position.is_open() {
            position.pool = call.target;
            position.investor = call.caller;
        }
        position.shares = shares;
        position.total_minted = total_minted;
        position.last_deposit_time = call.now;
        position.points_correction = points_correction;
        self.total_deposited = total_deposited;
        self.points_per_share = points_per_share;
        self.undistributed_interest = undistributed_interest;

        Ok(vec![
            LedgerEvent::BalanceUpdated(BalanceUpdated {
                pool: call.target,
                investor: call.caller,
                shares,
                total_deposited,
            }),
            LedgerEvent::CoolDown(CoolDown {
                pool: call.target,
                investor: call.caller,
                amount,
            }),
        ])
    }

    // ─── WITHDRAW ───────────────────────────────────────────────────

    /// Fails with `FundsLocked` while the cooldown runs; afterwards reports
    /// whether `amount` is covered by the position's shares.
    pub fn can_withdraw(&self, position: &InvestorPosition, amount: u64, now: i64) -> Result<bool> {
        require!(
            now >= position.unlocks_at(self.cooldown_period),
            PoolError::FundsLocked
        );
        Ok(amount <= position.shares)
    }

    /// Principal the position could withdraw right now; zero while locked.
    pub fn withdrawable_of(&self, position: &InvestorPosition, now: i64) -> u64 {
        if now >= position.unlocks_at(self.cooldown_period) {
            position.shares
        } else {
            0
        }
    }

    pub fn withdraw(
        &mut self,
        call: LedgerCall,
        registry: &impl Registry,
        position: &mut InvestorPosition,
        amount: u64,
    ) -> Result<Vec<LedgerEvent>> {
        Self::when_protocol_not_paused(registry)?;
        require!(amount > 0, PoolError::InvalidAmount);
        require_keys_eq!(position.investor, call.caller, PoolError::NotAuthorized);
        require_keys_eq!(position.pool, call.target, PoolError::NotAuthorized);

        let covered = self.can_withdraw(position, amount, call.now)?;
        require!(covered, PoolError::InsufficientShares);
        require!(amount <= self.available_liquidity(), PoolError::InsufficientLiquidity);

        let shares = position.shares - amount;
        let total_deposited = self
            .total_deposited
            .checked_sub(amount)
            .ok_or(PoolError::MathOverflow)?;
        let points_correction = position
            .points_correction
            .checked_add(self.points_for(amount)?)
            .ok_or(PoolError::MathOverflow)?;

        position.shares = shares;
        position.points_correction = points_correction;
        self.total_deposited = total_deposited;

        Ok(vec![
            LedgerEvent::BalanceUpdated(BalanceUpdated {
                pool: call.target,
                investor: call.caller,
                shares,
                total_deposited,
            }),
            LedgerEvent::Withdrawal(Withdrawal {
                pool: call.target,
                investor: call.caller,
                amount,
            }),
        ])
    }

    // ─── BORROWER ───────────────────────────────────────────────────

    pub fn drawdown(&mut self, call: LedgerCall, registry: &impl Registry, amount: u64) -> Result<Vec<LedgerEvent>> {
        Self::when_protocol_not_paused(registry)?;
        self.only_borrower(&call.caller)?;
        require!(self.state == PoolState::Finalized, PoolError::BadState);
        require!(amount > 0, PoolError::InvalidAmount);
        require!(amount <= self.available_liquidity(), PoolError::InsufficientLiquidity);

        let principal_out = self
            .principal_out
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        self.principal_out = principal_out;

        Ok(vec![LedgerEvent::Drawdown(Drawdown {
            pool: call.target,
            borrower: call.caller,
            amount,
            principal_out,
        })])
    }

    /// Split a repayment into principal reduction and distributable interest.
    pub fn split_payment(&self, amount: u64) -> (u64, u64) {
        let principal_portion = amount.min(self.principal_out);
        (principal_portion, amount - principal_portion)
    }

    pub fn make_payment(&mut self, call: LedgerCall, registry: &impl Registry, amount: u64) -> Result<Vec<LedgerEvent>> {
        Self::when_protocol_not_paused(registry)?;
        self.only_borrower(&call.caller)?;
        require!(amount > 0, PoolError::InvalidAmount);

        let (principal_portion, interest_portion) = self.split_payment(amount);
        let interest_pool = self
            .interest_pool
            .checked_add(interest_portion)
            .ok_or(PoolError::MathOverflow)?;
        let (points_per_share, undistributed_interest) = self.accrue(interest_portion, self.total_deposited)?;

        self.principal_out -= principal_portion;
        self.interest_pool = interest_pool;
        self.points_per_share = points_per_share;
        self.undistributed_interest = undistributed_interest;

        Ok(vec![LedgerEvent::Payment(Payment {
            pool: call.target,
            borrower: call.caller,
            principal_portion,
            interest_portion,
        })])
    }

    // ─── INTEREST ───────────────────────────────────────────────────

    fn points_for(&self, shares: u64) -> Result<i128> {
        let points = self
            .points_per_share
            .checked_mul(shares as u128)
            .ok_or(PoolError::MathOverflow)?;
        i128::try_from(points).map_err(|_| error!(PoolError::MathOverflow))
    }

    /// Index and carry-over after spreading `interest` plus anything still
    /// undistributed over `total_deposited` shares. Does not mutate.
    ///
    /// The per-share increment is rounded up so that a share that is owed a
    /// whole unit is paid that unit; claims stay capped by `interest_pool`.
    fn accrue(&self, interest: u64, total_deposited: u64) -> Result<(u128, u64)> {
        let pending = self
            .undistributed_interest
            .checked_add(interest)
            .ok_or(PoolError::MathOverflow)?;
        if total_deposited == 0 || pending == 0 {
            return Ok((self.points_per_share, pending));
        }

        let total = total_deposited as u128;
        let increment = (pending as u128)
            .checked_mul(POINTS_MULTIPLIER)
            .and_then(|points| points.checked_add(total - 1))
            .ok_or(PoolError::MathOverflow)?
            / total;
        let points_per_share = self
            .points_per_share
            .checked_add(increment)
            .ok_or(PoolError::MathOverflow)?;
        Ok((points_per_share, 0))
    }

    /// Interest the position has accrued and not yet claimed.
    ///
    /// Each repayment is split pro rata over the shares outstanding when it
    /// arrives. Later deposits and withdrawals, by this investor or anyone
    /// else, do not move interest that has already accrued.
    pub fn withdrawable_funds_of(&self, position: &InvestorPosition) -> Result<u64> {
        let accrued = self
            .points_for(position.shares)?
            .checked_add(position.points_correction)
            .ok_or(PoolError::MathOverflow)?
            / POINTS_MULTIPLIER as i128;
        let accrued = u64::try_from(accrued.max(0)).unwrap_or(u64::MAX);

        Ok(accrued
            .saturating_sub(position.funds_withdrawn)
            .min(self.interest_pool))
    }

    /// Claim the caller's whole withdrawable interest. Returns the amount.
    pub fn withdraw_funds(
        &mut self,
        call: LedgerCall,
        registry: &impl Registry,
        position: &mut InvestorPosition,
    ) -> Result<(u64, Vec<LedgerEvent>)> {
        Self::when_protocol_not_paused(registry)?;
        let amount = self.withdrawable_funds_of(position)?;
        require!(amount > 0, PoolError::NoInterestAvailable);

        let events = self.claim_interest(call, position, amount)?;
        Ok((amount, events))
    }

    pub fn withdraw_funds_amount(
        &mut self,
        call: LedgerCall,
        registry: &impl Registry,
        position: &mut InvestorPosition,
        amount: u64,
    ) -> Result<Vec<LedgerEvent>> {
        Self::when_protocol_not_paused(registry)?;
        require!(amount > 0, PoolError::InvalidAmount);
        require!(
            amount <= self.withdrawable_funds_of(position)?,
            PoolError::InsufficientInterest
        );

        self.claim_interest(call, position, amount)
    }

    fn claim_interest(
        &mut self,
        call: LedgerCall,
        position: &mut InvestorPosition,
        amount: u64,
    ) -> Result<Vec<LedgerEvent>> {
        require_keys_eq!(position.investor, call.caller, PoolError::NotAuthorized);
        require_keys_eq!(position.pool, call.target, PoolError::NotAuthorized);

        let funds_withdrawn = position
            .funds_withdrawn
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        let total_interest_claimed = self
            .total_interest_claimed
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        let interest_pool = self
            .interest_pool
            .checked_sub(amount)
            .ok_or(PoolError::MathOverflow)?;

        position.funds_withdrawn = funds_withdrawn;
        self.total_interest_claimed = total_interest_claimed;
        self.interest_pool = interest_pool;

        Ok(vec![LedgerEvent::FundsWithdrawn(FundsWithdrawn {
            pool: call.target,
            investor: call.caller,
            amount,
            total_withdrawn: funds_withdrawn,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockRegistry {
        delegates: Vec<Pubkey>,
        paused: bool,
    }

    impl Registry for MockRegistry {
        fn is_valid_pool_delegate(&self, delegate: &Pubkey) -> bool {
            self.delegates.contains(delegate)
        }

        fn is_valid_pool_factory(&self, _factory: &Pubkey) -> bool {
            true
        }

        fn is_valid_sub_factory(&self, _factory: &Pubkey, _sub_factory: &Pubkey, _kind: u8) -> bool {
            true
        }

        fn is_liquidity_asset_approved(&self, _asset: &Pubkey) -> bool {
            true
        }

        fn protocol_paused(&self) -> bool {
            self.paused
        }
    }

    const COOLDOWN: i64 = 1000;
    const START: i64 = 1_700_000_000;

    struct Harness {
        pool: Pool,
        key: Pubkey,
        delegate: Pubkey,
        borrower: Pubkey,
        registry: MockRegistry,
    }

    impl Harness {
        fn new() -> Self {
            let delegate = Pubkey::new_unique();
            let borrower = Pubkey::new_unique();
            let mut pool = Pool::default();
            pool.initialize(
                Pubkey::new_unique(),
                "pool-1".to_string(),
                delegate,
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                6,
                PoolTerms {
                    cooldown_period: COOLDOWN,
                    duration: 10_000,
                    pool_size: 100_000,
                    min_investment: 10,
                },
                254,
            );
            let mut h = Self {
                pool,
                key: Pubkey::new_unique(),
                delegate,
                borrower,
                registry: MockRegistry::default(),
            };
            h.pool.set_open_to_public(h.admin_call(), &h.registry, true).unwrap();
            h.pool.set_borrower(h.admin_call(), &h.registry, borrower).unwrap();
            h
        }

        fn finalized() -> Self {
            let mut h = Self::new();
            h.pool.finalize(h.admin_call(), &h.registry).unwrap();
            h
        }

        fn call(&self, caller: Pubkey, now: i64) -> LedgerCall {
            LedgerCall::new(self.key, caller, now)
        }

        fn admin_call(&self) -> LedgerCall {
            self.call(self.delegate, START)
        }

        fn deposit(&mut self, position: &mut InvestorPosition, investor: Pubkey, amount: u64, now: i64) -> Result<Vec<LedgerEvent>> {
            let call = self.call(investor, now);
            self.pool.deposit(call, &self.registry, position, amount)
        }
    }

    #[test]
    fn state_machine_moves_forward_only() {
        let mut h = Harness::new();
        assert_eq!(h.pool.state, PoolState::Initialized);

        let err = h.pool.deactivate(h.admin_call(), &h.registry).unwrap_err();
        assert_eq!(err, error!(PoolError::BadState));

        let events = h.pool.finalize(h.admin_call(), &h.registry).unwrap();
        assert_eq!(
            events,
            vec![LedgerEvent::PoolStateChanged(PoolStateChanged {
                pool: h.key,
                state: PoolState::Finalized,
            })]
        );

        let err = h.pool.finalize(h.admin_call(), &h.registry).unwrap_err();
        assert_eq!(err, error!(PoolError::BadState));

        h.pool.deactivate(h.admin_call(), &h.registry).unwrap();
        assert_eq!(h.pool.state, PoolState::Deactivated);

        let err = h.pool.finalize(h.admin_call(), &h.registry).unwrap_err();
        assert_eq!(err, error!(PoolError::BadState));
        let err = h.pool.deactivate(h.admin_call(), &h.registry).unwrap_err();
        assert_eq!(err, error!(PoolError::BadState));
    }

    #[test]
    fn only_admins_change_state() {
        let mut h = Harness::new();
        let outsider = Pubkey::new_unique();

        let err = h.pool.finalize(h.call(outsider, START), &h.registry).unwrap_err();
        assert_eq!(err, error!(PoolError::NotAuthorized));

        h.pool
            .set_pool_admin(h.admin_call(), &h.registry, outsider, true)
            .unwrap();
        h.pool.finalize(h.call(outsider, START), &h.registry).unwrap();
        assert_eq!(h.pool.state, PoolState::Finalized);
    }

    #[test]
    fn set_pool_admin_toggles_and_reports() {
        let mut h = Harness::new();
        let admin = Pubkey::new_unique();

        assert!(!h.pool.is_admin(&admin));
        let events = h
            .pool
            .set_pool_admin(h.admin_call(), &h.registry, admin, true)
            .unwrap();
        assert_eq!(
            events,
            vec![LedgerEvent::PoolAdminSet(PoolAdminSet {
                pool: h.key,
                admin,
                allowed: true,
            })]
        );
        assert!(h.pool.is_admin(&admin));

        h.pool
            .set_pool_admin(h.admin_call(), &h.registry, admin, true)
            .unwrap();
        assert_eq!(h.pool.pool_admins.len(), 1);

        h.pool
            .set_pool_admin(h.admin_call(), &h.registry, admin, false)
            .unwrap();
        assert!(!h.pool.is_admin(&admin));
    }

    #[test]
    fn set_borrower_rejects_zero_address() {
        let mut h = Harness::new();
        let before = h.pool.borrower;

        let err = h
            .pool
            .set_borrower(h.admin_call(), &h.registry, Pubkey::default())
            .unwrap_err();
        assert_eq!(err, error!(PoolError::ZeroAddress));
        assert_eq!(h.pool.borrower, before);
    }

    #[test]
    fn deposit_credits_position_and_emits() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();

        let events = h.deposit(&mut position, investor, 100, START).unwrap();

        assert_eq!(position.shares, 100);
        assert_eq!(position.total_minted, 100);
        assert_eq!(position.last_deposit_time, START);
        assert_eq!(position.investor, investor);
        assert_eq!(position.pool, h.key);
        assert_eq!(h.pool.total_deposited, 100);
        assert_eq!(
            events,
            vec![
                LedgerEvent::BalanceUpdated(BalanceUpdated {
                    pool: h.key,
                    investor,
                    shares: 100,
                    total_deposited: 100,
                }),
                LedgerEvent::CoolDown(CoolDown {
                    pool: h.key,
                    investor,
                    amount: 100,
                }),
            ]
        );
    }

    #[test]
    fn deposit_requires_finalized_pool() {
        let mut h = Harness::new();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();

        let err = h.deposit(&mut position, investor, 100, START).unwrap_err();
        assert_eq!(err, error!(PoolError::BadState));

        h.pool.finalize(h.admin_call(), &h.registry).unwrap();
        h.pool.deactivate(h.admin_call(), &h.registry).unwrap();

        let err = h.deposit(&mut position, investor, 100, START).unwrap_err();
        assert_eq!(err, error!(PoolError::BadState));
        assert_eq!(position.shares, 0);
        assert_eq!(h.pool.total_deposited, 0);
    }

    #[test]
    fn deposit_limits() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();

        let err = h.deposit(&mut position, investor, 9, START).unwrap_err();
        assert_eq!(err, error!(PoolError::BelowMinimum));

        let err = h.deposit(&mut position, investor, 130_000, START).unwrap_err();
        assert_eq!(err, error!(PoolError::CapExceeded));

        let err = h.deposit(&mut position, investor, 0, START).unwrap_err();
        assert_eq!(err, error!(PoolError::InvalidAmount));

        h.deposit(&mut position, investor, 10, START).unwrap();
        h.deposit(&mut position, investor, 99_990, START).unwrap();
        assert_eq!(h.pool.total_deposited, h.pool.pool_size);

        let err = h.deposit(&mut position, investor, 10, START).unwrap_err();
        assert_eq!(err, error!(PoolError::CapExceeded));
        assert_eq!(position.shares, 100_000);
    }

    #[test]
    fn private_pool_accepts_only_delegates() {
        let mut h = Harness::finalized();
        h.pool
            .set_open_to_public(h.admin_call(), &h.registry, false)
            .unwrap();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();

        assert!(!h.pool.is_deposit_allowed(&investor, 100, &h.registry));
        let err = h.deposit(&mut position, investor, 100, START).unwrap_err();
        assert_eq!(err, error!(PoolError::NotAllowListed));

        h.registry.delegates.push(investor);
        assert!(h.pool.is_deposit_allowed(&investor, 100, &h.registry));
        h.deposit(&mut position, investor, 100, START).unwrap();
        assert_eq!(position.shares, 100);
    }

    #[test]
    fn is_deposit_allowed_mirrors_deposit_checks() {
        let h = Harness::finalized();
        let investor = Pubkey::new_unique();

        assert!(h.pool.is_deposit_allowed(&investor, 10, &h.registry));
        assert!(!h.pool.is_deposit_allowed(&investor, 9, &h.registry));
        assert!(!h.pool.is_deposit_allowed(&investor, 100_001, &h.registry));

        let unopened = Harness::new();
        assert!(!unopened.pool.is_deposit_allowed(&investor, 10, &unopened.registry));
    }

    #[test]
    fn cooldown_gates_withdrawal() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();
        h.deposit(&mut position, investor, 100, START).unwrap();

        let err = h.pool.can_withdraw(&position, 100, START + COOLDOWN - 1).unwrap_err();
        assert_eq!(err, error!(PoolError::FundsLocked));
        assert_eq!(h.pool.withdrawable_of(&position, START + COOLDOWN - 1), 0);

        let err = h
            .pool
            .withdraw(h.call(investor, START + 1), &h.registry, &mut position, 100)
            .unwrap_err();
        assert_eq!(err, error!(PoolError::FundsLocked));
        assert_eq!(position.shares, 100);

        assert!(h.pool.can_withdraw(&position, 100, START + COOLDOWN).unwrap());
        assert!(!h.pool.can_withdraw(&position, 101, START + COOLDOWN).unwrap());
        assert_eq!(h.pool.withdrawable_of(&position, START + COOLDOWN), 100);
    }

    #[test]
    fn deposit_rearms_cooldown_for_whole_position() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();

        h.deposit(&mut position, investor, 100, START).unwrap();
        let later = START + COOLDOWN + 5;
        assert!(h.pool.can_withdraw(&position, 100, later).unwrap());

        h.deposit(&mut position, investor, 10, later).unwrap();
        let err = h.pool.can_withdraw(&position, 1, later + 1).unwrap_err();
        assert_eq!(err, error!(PoolError::FundsLocked));
        assert!(h.pool.can_withdraw(&position, 110, later + COOLDOWN).unwrap());
    }

    #[test]
    fn withdraw_keeps_lifetime_minted() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();
        h.deposit(&mut position, investor, 100, START).unwrap();

        let now = START + COOLDOWN + 1;
        let events = h
            .pool
            .withdraw(h.call(investor, now), &h.registry, &mut position, 40)
            .unwrap();

        assert_eq!(position.shares, 60);
        assert_eq!(position.total_minted, 100);
        assert_eq!(h.pool.total_deposited, 60);
        assert_eq!(
            events[1],
            LedgerEvent::Withdrawal(Withdrawal {
                pool: h.key,
                investor,
                amount: 40,
            })
        );

        let err = h
            .pool
            .withdraw(h.call(investor, now), &h.registry, &mut position, 61)
            .unwrap_err();
        assert_eq!(err, error!(PoolError::InsufficientShares));
    }

    #[test]
    fn withdraw_by_another_signer_is_rejected() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();
        h.deposit(&mut position, investor, 100, START).unwrap();

        let err = h
            .pool
            .withdraw(
                h.call(Pubkey::new_unique(), START + COOLDOWN),
                &h.registry,
                &mut position,
                100,
            )
            .unwrap_err();
        assert_eq!(err, error!(PoolError::NotAuthorized));
    }

    #[test]
    fn withdraw_cannot_take_drawn_principal() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();
        h.deposit(&mut position, investor, 1000, START).unwrap();
        h.pool
            .drawdown(h.call(h.borrower, START), &h.registry, 700)
            .unwrap();

        let now = START + COOLDOWN;
        let err = h
            .pool
            .withdraw(h.call(investor, now), &h.registry, &mut position, 301)
            .unwrap_err();
        assert_eq!(err, error!(PoolError::InsufficientLiquidity));

        h.pool
            .withdraw(h.call(investor, now), &h.registry, &mut position, 300)
            .unwrap();
        assert_eq!(h.pool.total_deposited, h.pool.principal_out);
    }

    #[test]
    fn drawdown_bounded_by_available_liquidity() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();

        let err = h
            .pool
            .drawdown(h.call(h.borrower, START), &h.registry, 200)
            .unwrap_err();
        assert_eq!(err, error!(PoolError::InsufficientLiquidity));

        h.deposit(&mut position, investor, 1000, START).unwrap();
        let events = h
            .pool
            .drawdown(h.call(h.borrower, START), &h.registry, 600)
            .unwrap();
        assert_eq!(
            events,
            vec![LedgerEvent::Drawdown(Drawdown {
                pool: h.key,
                borrower: h.borrower,
                amount: 600,
                principal_out: 600,
            })]
        );

        let err = h
            .pool
            .drawdown(h.call(h.borrower, START), &h.registry, 401)
            .unwrap_err();
        assert_eq!(err, error!(PoolError::InsufficientLiquidity));

        h.pool
            .drawdown(h.call(h.borrower, START), &h.registry, 400)
            .unwrap();
        assert_eq!(h.pool.principal_out, 1000);
        assert_eq!(h.pool.available_liquidity(), 0);
    }

    #[test]
    fn only_borrower_draws_and_repays() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();
        h.deposit(&mut position, investor, 1000, START).unwrap();

        let err = h
            .pool
            .drawdown(h.call(investor, START), &h.registry, 100)
            .unwrap_err();
        assert_eq!(err, error!(PoolError::NotAuthorized));

        let err = h
            .pool
            .make_payment(h.call(investor, START), &h.registry, 100)
            .unwrap_err();
        assert_eq!(err, error!(PoolError::NotAuthorized));
    }

    #[test]
    fn payment_splits_principal_then_interest() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();
        h.deposit(&mut position, investor, 30_000, START).unwrap();
        h.pool
            .drawdown(h.call(h.borrower, START), &h.registry, 30_000)
            .unwrap();

        let events = h
            .pool
            .make_payment(h.call(h.borrower, START), &h.registry, 1000)
            .unwrap();
        assert_eq!(
            events,
            vec![LedgerEvent::Payment(Payment {
                pool: h.key,
                borrower: h.borrower,
                principal_portion: 1000,
                interest_portion: 0,
            })]
        );
        assert_eq!(h.pool.principal_out, 29_000);
        assert_eq!(h.pool.interest_pool, 0);

        h.pool
            .make_payment(h.call(h.borrower, START), &h.registry, 32_000)
            .unwrap();
        assert_eq!(h.pool.principal_out, 0);
        assert_eq!(h.pool.interest_pool, 3000);
    }

    #[test]
    fn payment_with_no_principal_out_is_all_interest() {
        let mut h = Harness::finalized();
        assert_eq!(h.pool.split_payment(500), (0, 500));

        h.pool
            .make_payment(h.call(h.borrower, START), &h.registry, 500)
            .unwrap();
        assert_eq!(h.pool.interest_pool, 500);
    }

    #[test]
    fn interest_claims_full_and_partial() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();
        h.deposit(&mut position, investor, 1000, START).unwrap();
        h.pool
            .drawdown(h.call(h.borrower, START), &h.registry, 1000)
            .unwrap();
        h.pool
            .make_payment(h.call(h.borrower, START), &h.registry, 1100)
            .unwrap();

        assert_eq!(h.pool.withdrawable_funds_of(&position).unwrap(), 100);

        let err = h
            .pool
            .withdraw_funds_amount(h.call(investor, START), &h.registry, &mut position, 101)
            .unwrap_err();
        assert_eq!(err, error!(PoolError::InsufficientInterest));

        h.pool
            .withdraw_funds_amount(h.call(investor, START), &h.registry, &mut position, 40)
            .unwrap();
        assert_eq!(position.funds_withdrawn, 40);
        assert_eq!(h.pool.interest_pool, 60);

        let (claimed, events) = h
            .pool
            .withdraw_funds(h.call(investor, START), &h.registry, &mut position)
            .unwrap();
        assert_eq!(claimed, 60);
        assert_eq!(
            events,
            vec![LedgerEvent::FundsWithdrawn(FundsWithdrawn {
                pool: h.key,
                investor,
                amount: 60,
                total_withdrawn: 100,
            })]
        );
        assert_eq!(h.pool.interest_pool, 0);
        assert_eq!(h.pool.total_interest_claimed, 100);

        let err = h
            .pool
            .withdraw_funds(h.call(investor, START), &h.registry, &mut position)
            .unwrap_err();
        assert_eq!(err, error!(PoolError::NoInterestAvailable));
    }

    #[test]
    fn interest_claims_survive_deactivation() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();
        h.deposit(&mut position, investor, 1000, START).unwrap();
        h.pool
            .make_payment(h.call(h.borrower, START), &h.registry, 50)
            .unwrap();
        h.pool.deactivate(h.admin_call(), &h.registry).unwrap();

        let (claimed, _) = h
            .pool
            .withdraw_funds(h.call(investor, START), &h.registry, &mut position)
            .unwrap();
        assert_eq!(claimed, 50);
        h.pool
            .withdraw(h.call(investor, START + COOLDOWN), &h.registry, &mut position, 1000)
            .unwrap();
        assert_eq!(h.pool.total_deposited, 0);
    }

    #[test]
    fn interest_claimable_after_principal_withdrawn() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();
        h.deposit(&mut position, investor, 1000, START).unwrap();
        h.pool
            .drawdown(h.call(h.borrower, START), &h.registry, 1000)
            .unwrap();
        h.pool
            .make_payment(h.call(h.borrower, START), &h.registry, 1100)
            .unwrap();

        let now = START + COOLDOWN;
        h.pool
            .withdraw(h.call(investor, now), &h.registry, &mut position, 1000)
            .unwrap();
        assert_eq!(position.shares, 0);
        assert_eq!(h.pool.total_deposited, 0);
        assert_eq!(h.pool.withdrawable_funds_of(&position).unwrap(), 100);

        h.pool
            .withdraw_funds_amount(h.call(investor, now), &h.registry, &mut position, 99)
            .unwrap();
        let (claimed, _) = h
            .pool
            .withdraw_funds(h.call(investor, now), &h.registry, &mut position)
            .unwrap();
        assert_eq!(claimed, 1);
        assert_eq!(h.pool.interest_pool, 0);
    }

    #[test]
    fn later_deposits_do_not_dilute_accrued_interest() {
        let mut h = Harness::finalized();
        let (early, late) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut early_pos = InvestorPosition::default();
        let mut late_pos = InvestorPosition::default();

        h.deposit(&mut early_pos, early, 1000, START).unwrap();
        h.pool
            .make_payment(h.call(h.borrower, START), &h.registry, 300)
            .unwrap();

        h.deposit(&mut late_pos, late, 2000, START).unwrap();
        assert_eq!(h.pool.withdrawable_funds_of(&early_pos).unwrap(), 300);
        assert_eq!(h.pool.withdrawable_funds_of(&late_pos).unwrap(), 0);

        h.pool
            .make_payment(h.call(h.borrower, START), &h.registry, 300)
            .unwrap();
        assert_eq!(h.pool.withdrawable_funds_of(&early_pos).unwrap(), 400);
        assert_eq!(h.pool.withdrawable_funds_of(&late_pos).unwrap(), 200);
    }

    #[test]
    fn interest_paid_into_empty_pool_goes_to_next_depositor() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();

        h.pool
            .make_payment(h.call(h.borrower, START), &h.registry, 70)
            .unwrap();
        assert_eq!(h.pool.undistributed_interest, 70);
        assert_eq!(h.pool.interest_pool, 70);

        h.deposit(&mut position, investor, 500, START).unwrap();
        assert_eq!(h.pool.undistributed_interest, 0);
        assert_eq!(h.pool.withdrawable_funds_of(&position).unwrap(), 70);
    }

    #[test]
    fn protocol_pause_blocks_mutations() {
        let mut h = Harness::finalized();
        let investor = Pubkey::new_unique();
        let mut position = InvestorPosition::default();
        h.deposit(&mut position, investor, 1000, START).unwrap();
        h.registry.paused = true;

        let err = h.deposit(&mut position, investor, 100, START).unwrap_err();
        assert_eq!(err, error!(PoolError::ProtocolPaused));
        let err = h
            .pool
            .withdraw(h.call(investor, START + COOLDOWN), &h.registry, &mut position, 100)
            .unwrap_err();
        assert_eq!(err, error!(PoolError::ProtocolPaused));
        let err = h
            .pool
            .drawdown(h.call(h.borrower, START), &h.registry, 100)
            .unwrap_err();
        assert_eq!(err, error!(PoolError::ProtocolPaused));
        let err = h.pool.deactivate(h.admin_call(), &h.registry).unwrap_err();
        assert_eq!(err, error!(PoolError::ProtocolPaused));

        assert_eq!(h.pool.total_deposited, 1000);
        assert_eq!(h.pool.principal_out, 0);
        assert_eq!(h.pool.state, PoolState::Finalized);
    }

    #[test]
    fn terms_validation() {
        let good = PoolTerms {
            cooldown_period: 10,
            duration: 12,
            pool_size: 100_000,
            min_investment: 1,
        };
        assert!(good.validate().is_ok());

        let cases = [
            PoolTerms { pool_size: 0, ..good },
            PoolTerms { min_investment: 0, ..good },
            PoolTerms { min_investment: 100_001, ..good },
            PoolTerms { cooldown_period: -1, ..good },
            PoolTerms { duration: 0, ..good },
        ];
        for terms in cases {
            assert_eq!(terms.validate().unwrap_err(), error!(PoolError::InvalidPoolTerms));
        }
    }
}
