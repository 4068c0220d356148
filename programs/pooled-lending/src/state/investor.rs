use anchor_lang::prelude::*;

/// One investor's position in one pool.
///
/// Seeds: ["investor", pool, investor]
/// Created on first deposit and never closed; withdrawals only zero it.
#[account]
#[derive(Debug, Default)]
pub struct InvestorPosition {
    /// The pool this position belongs to
    pub pool: Pubkey,
    /// The investor's wallet
    pub investor: Pubkey,
    /// Withdrawable principal claim, 1:1 with deposited units
    pub shares: u64,
    /// Lifetime deposits; never reduced by withdrawals
    pub total_minted: u64,
    /// Timestamp of the most recent deposit, start of the cooldown
    pub last_deposit_time: i64,
    /// Lifetime interest claimed
    pub funds_withdrawn: u64,
    /// Offsets `points_per_share * shares` so that share changes leave
    /// interest accrued before them untouched
    pub points_correction: i128,
    /// PDA bump
    pub bump: u8,
}

impl InvestorPosition {
    pub const SIZE: usize = 8  // discriminator
        + 32   // pool
        + 32   // investor
        + 8    // shares
        + 8    // total_minted
        + 8    // last_deposit_time
        + 8    // funds_withdrawn
        + 16   // points_correction
        + 1;   // bump

    pub fn is_open(&self) -> bool {
        self.investor != Pubkey::default()
    }

    /// Earliest timestamp at which principal may be withdrawn.
    pub fn unlocks_at(&self, cooldown_period: i64) -> i64 {
        self.last_deposit_time.saturating_add(cooldown_period)
    }
}
