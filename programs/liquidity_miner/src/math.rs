use crate::error::*;

/// Safe math operations trait to prevent overflows
pub trait SafeMath<T> {
    fn safe_add(&self, other: T) -> MinerResult<T>;
    fn safe_sub(&self, other: T) -> MinerResult<T>;
    fn safe_mul(&self, other: T) -> MinerResult<T>;
    fn safe_div(&self, other: T) -> MinerResult<T>;
}

/// Implementation for u64
impl SafeMath<u64> for u64 {
    fn safe_add(&self, other: u64) -> MinerResult<u64> {
        self.checked_add(other).ok_or(MinerError::MathOverflow)
    }

    fn safe_sub(&self, other: u64) -> MinerResult<u64> {
        self.checked_sub(other).ok_or(MinerError::MathOverflow)
    }

    fn safe_mul(&self, other: u64) -> MinerResult<u64> {
        self.checked_mul(other).ok_or(MinerError::MathOverflow)
    }

    fn safe_div(&self, other: u64) -> MinerResult<u64> {
        if other == 0 {
            return Err(MinerError::DivisionByZero);
        }
        self.checked_div(other).ok_or(MinerError::MathOverflow)
    }
}

/// Implementation for u128
impl SafeMath<u128> for u128 {
    fn safe_add(&self, other: u128) -> MinerResult<u128> {
        self.checked_add(other).ok_or(MinerError::MathOverflow)
    }

    fn safe_sub(&self, other: u128) -> MinerResult<u128> {
        self.checked_sub(other).ok_or(MinerError::MathOverflow)
    }

    fn safe_mul(&self, other: u128) -> MinerResult<u128> {
        self.checked_mul(other).ok_or(MinerError::MathOverflow)
    }

    fn safe_div(&self, other: u128) -> MinerResult<u128> {
        if other == 0 {
            return Err(MinerError::DivisionByZero);
        }
        self.checked_div(other).ok_or(MinerError::MathOverflow)
    }
}

pub mod miner_math {
    use super::*;

    /// Amount received into a custody account across an external call.
    pub fn received(pre: u64, post: u64) -> MinerResult<u64> {
        post.checked_sub(pre).ok_or(MinerError::MathOverflow)
    }

    /// Amount consumed from a custody account across an external call.
    pub fn consumed(pre: u64, post: u64) -> MinerResult<u64> {
        pre.checked_sub(post).ok_or(MinerError::MathOverflow)
    }

    /// Remainder owed back to the ledger once the router reports actual
    /// consumption. Consuming more than was handed over is a router fault.
    pub fn unused_remainder(desired: u64, used: u64) -> MinerResult<u64> {
        if used > desired {
            return Err(MinerError::LiquidityProvisionFailed);
        }
        Ok(desired - used)
    }

    /// Validate router-reported consumption against the caller's bounds and
    /// compute the remainders owed back to the ledger for both legs.
    pub fn settle_provision(
        desired_a: u64,
        used_a: u64,
        min_a: u64,
        desired_b: u64,
        used_b: u64,
        min_b: u64,
        shares_minted: u64,
    ) -> MinerResult<(u64, u64)> {
        if shares_minted == 0 || used_a == 0 || used_b == 0 {
            return Err(MinerError::LiquidityProvisionFailed);
        }
        if used_a < min_a || used_b < min_b {
            return Err(MinerError::LiquidityProvisionFailed);
        }
        let refund_a = unused_remainder(desired_a, used_a)?;
        let refund_b = unused_remainder(desired_b, used_b)?;
        Ok((refund_a, refund_b))
    }

    /// Custody held above the tracked free balance. This is what a recovery
    /// sweep may credit back into the ledger.
    pub fn untracked_excess(custody: u64, tracked: u64) -> MinerResult<u64> {
        let excess = custody.saturating_sub(tracked);
        if excess == 0 {
            return Err(MinerError::NothingToSweep);
        }
        Ok(excess)
    }
}
