use anchor_lang::prelude::*;
use static_assertions::const_assert;

use crate::error::*;
use crate::interface::farm::FarmVersion;

/// Singleton configuration and authority account. The coordinator PDA is
/// the token authority for every custody vault, so its signature is what
/// external programs see when they pull funds.
#[account]
#[derive(Default)]
pub struct Coordinator {
    /// The only identity allowed to move funds
    pub operator: Pubkey,
    /// External AMM router program
    pub amm_router: Pubkey,
    /// External farm program, version 1
    pub farm_v1: Pubkey,
    /// External farm program, version 2
    pub farm_v2: Pubkey,
    /// Mint of the reward token paid by the farms
    pub reward_mint: Pubkey,
    /// Bump seed for PDA
    pub bump: u8,
    /// Reserved for future use
    pub _reserved: [u64; 4],
}

impl Coordinator {
    pub const LEN: usize = 8 + // discriminator
        32 + // operator
        32 + // amm_router
        32 + // farm_v1
        32 + // farm_v2
        32 + // reward_mint
        1 + // bump
        32; // _reserved

    pub fn initialize(
        &mut self,
        operator: Pubkey,
        amm_router: Pubkey,
        farm_v1: Pubkey,
        farm_v2: Pubkey,
        reward_mint: Pubkey,
        bump: u8,
    ) -> MinerResult {
        if operator == Pubkey::default()
            || amm_router == Pubkey::default()
            || farm_v1 == Pubkey::default()
            || farm_v2 == Pubkey::default()
            || reward_mint == Pubkey::default()
        {
            return Err(MinerError::InvalidConfig);
        }

        self.operator = operator;
        self.amm_router = amm_router;
        self.farm_v1 = farm_v1;
        self.farm_v2 = farm_v2;
        self.reward_mint = reward_mint;
        self.bump = bump;
        self._reserved = [0; 4];

        Ok(())
    }

    pub fn is_operator(&self, caller: &Pubkey) -> bool {
        self.operator == *caller
    }

    pub fn require_operator(&self, caller: &Pubkey) -> MinerResult {
        if !self.is_operator(caller) {
            return Err(MinerError::Unauthorized);
        }
        Ok(())
    }

    /// The external program backing the selected version.
    pub fn farm_program(&self, version: FarmVersion) -> Pubkey {
        match version {
            FarmVersion::V1 => self.farm_v1,
            FarmVersion::V2 => self.farm_v2,
        }
    }
}

const_assert!(Coordinator::LEN == 8 + 32 * 5 + 1 + 32);
