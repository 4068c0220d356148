use anchor_lang::prelude::*;

use crate::errors::PoolError;

pub mod factory;
pub mod globals;
pub mod investor;
pub mod locker;
pub mod pool;

pub use factory::*;
pub use globals::*;
pub use investor::*;
pub use locker::*;
pub use pool::*;

/// Who is calling, against which account, and when.
///
/// Handlers build this from the signer and the `Clock` sysvar so the
/// state methods never read ambient runtime state.
#[derive(Clone, Copy, Debug)]
pub struct LedgerCall {
    /// Address of the account being operated on
    pub target: Pubkey,
    pub caller: Pubkey,
    /// Unix timestamp of the call
    pub now: i64,
}

impl LedgerCall {
    pub fn new(target: Pubkey, caller: Pubkey, now: i64) -> Self {
        Self { target, caller, now }
    }
}

/// Add or remove `entry` from a bounded membership list.
///
/// Idempotent in both directions. Returns whether the list changed.
/// Callers reject zero keys before calling.
pub fn set_member<T: PartialEq>(list: &mut Vec<T>, entry: T, allowed: bool, cap: usize) -> Result<bool> {
    let position = list.iter().position(|e| *e == entry);
    match (allowed, position) {
        (true, None) => {
            require!(list.len() < cap, PoolError::AllowListFull);
            list.push(entry);
            Ok(true)
        }
        (false, Some(i)) => {
            list.swap_remove(i);
            Ok(true)
        }
        _ => Ok(false),
    }
}
