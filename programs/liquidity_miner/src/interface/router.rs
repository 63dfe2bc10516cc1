//! CPI builders for the external AMM router.
//!
//! The router pulls the pair legs from the coordinator's custody using the
//! propagated coordinator signature, mints LP shares to `lp_destination`,
//! and leaves whatever it did not consume in place. Consumed amounts are
//! therefore observable as custody balance deltas, which is what the
//! provisioning handler settles against. Instruction data is a one-byte
//! discriminator followed by little-endian fields.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;
use anchor_lang::solana_program::program_error::ProgramError;

/// Router instruction discriminators.
pub const ADD_LIQUIDITY_IX: u8 = 0;
pub const ADD_LIQUIDITY_SOL_IX: u8 = 1;

/// Parameters for the token/token liquidity-add.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddLiquidityParams {
    pub amount_a_desired: u64,
    pub amount_b_desired: u64,
    pub amount_a_min: u64,
    pub amount_b_min: u64,
    /// Unix timestamp the router must not execute after
    pub deadline: i64,
}

impl AddLiquidityParams {
    pub fn to_bytes(&self) -> [u8; 40] {
        let mut buf = [0u8; 40];
        buf[0..8].copy_from_slice(&self.amount_a_desired.to_le_bytes());
        buf[8..16].copy_from_slice(&self.amount_b_desired.to_le_bytes());
        buf[16..24].copy_from_slice(&self.amount_a_min.to_le_bytes());
        buf[24..32].copy_from_slice(&self.amount_b_min.to_le_bytes());
        buf[32..40].copy_from_slice(&self.deadline.to_le_bytes());
        buf
    }
}

/// Parameters for the token/native liquidity-add variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddLiquiditySolParams {
    pub amount_token_desired: u64,
    pub amount_token_min: u64,
    pub lamports_desired: u64,
    pub lamports_min: u64,
    /// Unix timestamp the router must not execute after
    pub deadline: i64,
}

impl AddLiquiditySolParams {
    pub fn to_bytes(&self) -> [u8; 40] {
        let mut buf = [0u8; 40];
        buf[0..8].copy_from_slice(&self.amount_token_desired.to_le_bytes());
        buf[8..16].copy_from_slice(&self.amount_token_min.to_le_bytes());
        buf[16..24].copy_from_slice(&self.lamports_desired.to_le_bytes());
        buf[24..32].copy_from_slice(&self.lamports_min.to_le_bytes());
        buf[32..40].copy_from_slice(&self.deadline.to_le_bytes());
        buf
    }
}

/// Build instruction data for `AddLiquidity`.
///
/// Layout: [discriminator: u8, params (40 bytes)]
pub fn build_add_liquidity_data(params: &AddLiquidityParams) -> [u8; 41] {
    let mut data = [0u8; 41];
    data[0] = ADD_LIQUIDITY_IX;
    data[1..41].copy_from_slice(&params.to_bytes());
    data
}

/// Build instruction data for `AddLiquiditySol`.
///
/// Layout: [discriminator: u8, params (40 bytes)]
pub fn build_add_liquidity_sol_data(params: &AddLiquiditySolParams) -> [u8; 41] {
    let mut data = [0u8; 41];
    data[0] = ADD_LIQUIDITY_SOL_IX;
    data[1..41].copy_from_slice(&params.to_bytes());
    data
}

/// Accounts the router expects for `AddLiquidity`, in order.
pub struct RouterAccounts<'a, 'info> {
    pub router_program: &'a AccountInfo<'info>,
    /// Router pool state (writable)
    pub pool: &'a AccountInfo<'info>,
    /// Router custody for asset A (writable)
    pub pool_vault_a: &'a AccountInfo<'info>,
    /// Router custody for asset B (writable)
    pub pool_vault_b: &'a AccountInfo<'info>,
    /// LP mint, minted to `lp_destination` (writable)
    pub lp_mint: &'a AccountInfo<'info>,
    /// Coordinator custody for asset A, debited by the router (writable)
    pub source_a: &'a AccountInfo<'info>,
    /// Coordinator custody for asset B, debited by the router (writable)
    pub source_b: &'a AccountInfo<'info>,
    /// Coordinator LP vault (writable)
    pub lp_destination: &'a AccountInfo<'info>,
    /// Coordinator PDA, signs for the source pulls
    pub authority: &'a AccountInfo<'info>,
    pub token_program: &'a AccountInfo<'info>,
}

impl<'a, 'info> RouterAccounts<'a, 'info> {
    fn metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(*self.pool.key, false),
            AccountMeta::new(*self.pool_vault_a.key, false),
            AccountMeta::new(*self.pool_vault_b.key, false),
            AccountMeta::new(*self.lp_mint.key, false),
            AccountMeta::new(*self.source_a.key, false),
            AccountMeta::new(*self.source_b.key, false),
            AccountMeta::new(*self.lp_destination.key, false),
            AccountMeta::new_readonly(*self.authority.key, true),
            AccountMeta::new_readonly(*self.token_program.key, false),
        ]
    }

    fn infos(&self) -> Vec<AccountInfo<'info>> {
        vec![
            self.pool.clone(),
            self.pool_vault_a.clone(),
            self.pool_vault_b.clone(),
            self.lp_mint.clone(),
            self.source_a.clone(),
            self.source_b.clone(),
            self.lp_destination.clone(),
            self.authority.clone(),
            self.token_program.clone(),
            self.router_program.clone(),
        ]
    }
}

/// Invoke the router's token/token liquidity-add.
pub fn add_liquidity(
    accounts: &RouterAccounts,
    params: &AddLiquidityParams,
    signer_seeds: &[&[&[u8]]],
) -> std::result::Result<(), ProgramError> {
    let ix = Instruction {
        program_id: *accounts.router_program.key,
        accounts: accounts.metas(),
        data: build_add_liquidity_data(params).to_vec(),
    };
    invoke_signed(&ix, &accounts.infos(), signer_seeds)
}

/// Accounts the router expects for `AddLiquiditySol`, in order.
pub struct RouterSolAccounts<'a, 'info> {
    pub router_program: &'a AccountInfo<'info>,
    /// Router pool state (writable)
    pub pool: &'a AccountInfo<'info>,
    /// Router custody for the token leg (writable)
    pub pool_vault_token: &'a AccountInfo<'info>,
    /// Router lamport custody (writable)
    pub pool_sol_vault: &'a AccountInfo<'info>,
    /// LP mint, minted to `lp_destination` (writable)
    pub lp_mint: &'a AccountInfo<'info>,
    /// Coordinator custody for the token leg (writable)
    pub source_token: &'a AccountInfo<'info>,
    /// Coordinator lamport vault; co-signs so the router can move lamports
    pub sol_source: &'a AccountInfo<'info>,
    /// Coordinator LP vault (writable)
    pub lp_destination: &'a AccountInfo<'info>,
    /// Coordinator PDA, signs for the token pull
    pub authority: &'a AccountInfo<'info>,
    pub token_program: &'a AccountInfo<'info>,
    pub system_program: &'a AccountInfo<'info>,
}

impl<'a, 'info> RouterSolAccounts<'a, 'info> {
    fn metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(*self.pool.key, false),
            AccountMeta::new(*self.pool_vault_token.key, false),
            AccountMeta::new(*self.pool_sol_vault.key, false),
            AccountMeta::new(*self.lp_mint.key, false),
            AccountMeta::new(*self.source_token.key, false),
            AccountMeta::new(*self.sol_source.key, true),
            AccountMeta::new(*self.lp_destination.key, false),
            AccountMeta::new_readonly(*self.authority.key, true),
            AccountMeta::new_readonly(*self.token_program.key, false),
            AccountMeta::new_readonly(*self.system_program.key, false),
        ]
    }

    fn infos(&self) -> Vec<AccountInfo<'info>> {
        vec![
            self.pool.clone(),
            self.pool_vault_token.clone(),
            self.pool_sol_vault.clone(),
            self.lp_mint.clone(),
            self.source_token.clone(),
            self.sol_source.clone(),
            self.lp_destination.clone(),
            self.authority.clone(),
            self.token_program.clone(),
            self.system_program.clone(),
            self.router_program.clone(),
        ]
    }
}

/// Invoke the router's token/native liquidity-add.
pub fn add_liquidity_sol(
    accounts: &RouterSolAccounts,
    params: &AddLiquiditySolParams,
    signer_seeds: &[&[&[u8]]],
) -> std::result::Result<(), ProgramError> {
    let ix = Instruction {
        program_id: *accounts.router_program.key,
        accounts: accounts.metas(),
        data: build_add_liquidity_sol_data(params).to_vec(),
    };
    invoke_signed(&ix, &accounts.infos(), signer_seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_liquidity_data_layout() {
        let params = AddLiquidityParams {
            amount_a_desired: 1_000,
            amount_b_desired: 2_000,
            amount_a_min: 900,
            amount_b_min: 1_800,
            deadline: 1_700_000_000,
        };
        let data = build_add_liquidity_data(&params);
        assert_eq!(data.len(), 41);
        assert_eq!(data[0], ADD_LIQUIDITY_IX);
        assert_eq!(u64::from_le_bytes(data[1..9].try_into().unwrap()), 1_000);
        assert_eq!(u64::from_le_bytes(data[9..17].try_into().unwrap()), 2_000);
        assert_eq!(u64::from_le_bytes(data[17..25].try_into().unwrap()), 900);
        assert_eq!(u64::from_le_bytes(data[25..33].try_into().unwrap()), 1_800);
        assert_eq!(
            i64::from_le_bytes(data[33..41].try_into().unwrap()),
            1_700_000_000
        );
    }

    #[test]
    fn test_add_liquidity_sol_data_layout() {
        let params = AddLiquiditySolParams {
            amount_token_desired: 500,
            amount_token_min: 0,
            lamports_desired: 2_000_000_000,
            lamports_min: 0,
            deadline: 1_700_000_300,
        };
        let data = build_add_liquidity_sol_data(&params);
        assert_eq!(data.len(), 41);
        assert_eq!(data[0], ADD_LIQUIDITY_SOL_IX);
        assert_eq!(u64::from_le_bytes(data[1..9].try_into().unwrap()), 500);
        assert_eq!(
            u64::from_le_bytes(data[17..25].try_into().unwrap()),
            2_000_000_000
        );
    }
}
