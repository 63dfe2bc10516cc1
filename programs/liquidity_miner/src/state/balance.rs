use anchor_lang::prelude::*;
use static_assertions::const_assert;

use crate::error::*;
use crate::math::SafeMath;

/// One ledger entry per asset. `free` is the quantity available to deploy
/// or withdraw; anything staked lives at the farm program and is not
/// counted here. Entries are commingled across depositors.
#[account]
#[derive(Default)]
pub struct BalanceEntry {
    /// The asset this entry tracks (a mint, or the native marker)
    pub asset: Pubkey,
    /// Free quantity in base units
    pub free: u64,
    /// Bump seed for PDA
    pub bump: u8,
}

impl BalanceEntry {
    pub const LEN: usize = 8 + // discriminator
        32 + // asset
        8 + // free
        1; // bump

    pub fn initialize(&mut self, asset: Pubkey, bump: u8) {
        self.asset = asset;
        self.free = 0;
        self.bump = bump;
    }

    /// True for entries freshly created by `init_if_needed`.
    pub fn is_uninitialized(&self) -> bool {
        self.asset == Pubkey::default()
    }

    pub fn credit(&mut self, amount: u64) -> MinerResult {
        self.free = self.free.safe_add(amount)?;
        Ok(())
    }

    /// Debit `amount` from the free balance. Fails without any change when
    /// the entry does not cover it.
    pub fn debit(&mut self, amount: u64) -> MinerResult<u64> {
        if amount > self.free {
            return Err(MinerError::InsufficientBalance);
        }
        self.free = self.free.safe_sub(amount)?;
        Ok(amount)
    }

    pub fn balance(&self) -> u64 {
        self.free
    }
}

const_assert!(BalanceEntry::LEN == 8 + 32 + 8 + 1);
