use anchor_lang::prelude::*;

use crate::interface::farm::FarmVersion;

#[event]
pub struct Deposited {
    pub asset: Pubkey,
    pub amount: u64,
    pub depositor: Pubkey,
}

/// Reconciliation event for integrators: what the router actually
/// consumed and minted.
#[event]
pub struct LiquidityProvided {
    pub asset_a: Pubkey,
    pub asset_b: Pubkey,
    pub amount_a_used: u64,
    pub amount_b_used: u64,
    pub shares_minted: u64,
    pub pool_id: u64,
    pub version: FarmVersion,
}

#[event]
pub struct RewardsWithdrawn {
    pub pool_id: u64,
    pub version: FarmVersion,
    pub reward_amount: u64,
    pub shares_withdrawn: u64,
}

#[event]
pub struct Withdrawn {
    pub asset: Pubkey,
    pub amount: u64,
}

#[event]
pub struct UntrackedSwept {
    pub asset: Pubkey,
    pub amount: u64,
}
