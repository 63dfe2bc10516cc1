//! CPI builders for the external farm programs.
//!
//! Two farm versions sit behind the coordinator's one staking contract.
//! Deposit shares a call shape across versions; withdraw does not: V2
//! requires the reward recipient spelled out in the instruction data,
//! while V1 pays the reward account passed in the metas. Instruction data
//! is a one-byte discriminator followed by little-endian fields.
//!
//! Deposits never pay out rewards; harvest happens only on withdraw
//! (`amount == 0` is a harvest-only withdraw).

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::{get_return_data, invoke, invoke_signed};
use anchor_lang::solana_program::program_error::ProgramError;

/// Farm instruction discriminators, shared by both versions.
pub const DEPOSIT_IX: u8 = 0;
pub const WITHDRAW_IX: u8 = 1;
pub const PENDING_REWARD_IX: u8 = 2;

/// Which external staking program a position lives in.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FarmVersion {
    V1,
    V2,
}

/// Build instruction data for a deposit CPI.
///
/// Layout: [discriminator: u8, pool_id: u64 le, amount: u64 le]
pub fn build_deposit_data(pool_id: u64, amount: u64) -> [u8; 17] {
    let mut data = [0u8; 17];
    data[0] = DEPOSIT_IX;
    data[1..9].copy_from_slice(&pool_id.to_le_bytes());
    data[9..17].copy_from_slice(&amount.to_le_bytes());
    data
}

/// Build V1 withdraw instruction data.
///
/// Layout: [discriminator: u8, pool_id: u64 le, amount: u64 le]
pub fn build_withdraw_data_v1(pool_id: u64, amount: u64) -> [u8; 17] {
    let mut data = [0u8; 17];
    data[0] = WITHDRAW_IX;
    data[1..9].copy_from_slice(&pool_id.to_le_bytes());
    data[9..17].copy_from_slice(&amount.to_le_bytes());
    data
}

/// Build V2 withdraw instruction data. V2 wants an explicit reward
/// recipient.
///
/// Layout: [discriminator: u8, pool_id: u64 le, amount: u64 le, recipient: 32 bytes]
pub fn build_withdraw_data_v2(pool_id: u64, amount: u64, recipient: &Pubkey) -> [u8; 49] {
    let mut data = [0u8; 49];
    data[0] = WITHDRAW_IX;
    data[1..9].copy_from_slice(&pool_id.to_le_bytes());
    data[9..17].copy_from_slice(&amount.to_le_bytes());
    data[17..49].copy_from_slice(recipient.as_ref());
    data
}

/// Build instruction data for the pending-reward query.
///
/// Layout: [discriminator: u8, pool_id: u64 le]
pub fn build_pending_reward_data(pool_id: u64) -> [u8; 9] {
    let mut data = [0u8; 9];
    data[0] = PENDING_REWARD_IX;
    data[1..9].copy_from_slice(&pool_id.to_le_bytes());
    data
}

/// Parse the u64 a farm sets as return data for a pending-reward query.
pub fn parse_pending_reward(data: &[u8]) -> Option<u64> {
    if data.len() < 8 {
        return None;
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[..8]);
    Some(u64::from_le_bytes(buf))
}

/// Accounts both farm versions expect for a deposit, in order.
pub struct FarmDepositAccounts<'a, 'info> {
    pub farm_program: &'a AccountInfo<'info>,
    /// Farm pool state (writable)
    pub pool: &'a AccountInfo<'info>,
    /// Farm per-user bookkeeping for the coordinator (writable)
    pub user_stake: &'a AccountInfo<'info>,
    /// Farm share-token custody (writable)
    pub farm_share_vault: &'a AccountInfo<'info>,
    /// Coordinator share-token vault (writable)
    pub share_vault: &'a AccountInfo<'info>,
    /// Coordinator PDA, signs for the share pull
    pub authority: &'a AccountInfo<'info>,
    pub token_program: &'a AccountInfo<'info>,
}

impl<'a, 'info> FarmDepositAccounts<'a, 'info> {
    fn metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(*self.pool.key, false),
            AccountMeta::new(*self.user_stake.key, false),
            AccountMeta::new(*self.farm_share_vault.key, false),
            AccountMeta::new(*self.share_vault.key, false),
            AccountMeta::new_readonly(*self.authority.key, true),
            AccountMeta::new_readonly(*self.token_program.key, false),
        ]
    }

    fn infos(&self) -> Vec<AccountInfo<'info>> {
        vec![
            self.pool.clone(),
            self.user_stake.clone(),
            self.farm_share_vault.clone(),
            self.share_vault.clone(),
            self.authority.clone(),
            self.token_program.clone(),
            self.farm_program.clone(),
        ]
    }
}

/// Accounts for a withdraw: the deposit set plus the reward destination.
pub struct FarmWithdrawAccounts<'a, 'info> {
    pub farm_program: &'a AccountInfo<'info>,
    /// Farm pool state (writable)
    pub pool: &'a AccountInfo<'info>,
    /// Farm per-user bookkeeping for the coordinator (writable)
    pub user_stake: &'a AccountInfo<'info>,
    /// Farm share-token custody (writable)
    pub farm_share_vault: &'a AccountInfo<'info>,
    /// Coordinator share-token vault (writable)
    pub share_vault: &'a AccountInfo<'info>,
    /// Coordinator reward vault, credited with the harvest (writable)
    pub reward_vault: &'a AccountInfo<'info>,
    /// Coordinator PDA, signs for the share pull
    pub authority: &'a AccountInfo<'info>,
    pub token_program: &'a AccountInfo<'info>,
}

impl<'a, 'info> FarmWithdrawAccounts<'a, 'info> {
    fn metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(*self.pool.key, false),
            AccountMeta::new(*self.user_stake.key, false),
            AccountMeta::new(*self.farm_share_vault.key, false),
            AccountMeta::new(*self.share_vault.key, false),
            AccountMeta::new(*self.reward_vault.key, false),
            AccountMeta::new_readonly(*self.authority.key, true),
            AccountMeta::new_readonly(*self.token_program.key, false),
        ]
    }

    fn infos(&self) -> Vec<AccountInfo<'info>> {
        vec![
            self.pool.clone(),
            self.user_stake.clone(),
            self.farm_share_vault.clone(),
            self.share_vault.clone(),
            self.reward_vault.clone(),
            self.authority.clone(),
            self.token_program.clone(),
            self.farm_program.clone(),
        ]
    }
}

/// Stake shares into the selected farm. Both versions share this shape.
pub fn deposit(
    accounts: &FarmDepositAccounts,
    pool_id: u64,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> std::result::Result<(), ProgramError> {
    let ix = Instruction {
        program_id: *accounts.farm_program.key,
        accounts: accounts.metas(),
        data: build_deposit_data(pool_id, amount).to_vec(),
    };
    invoke_signed(&ix, &accounts.infos(), signer_seeds)
}

/// Withdraw staked shares and harvest accrued rewards. `amount == 0`
/// harvests without unstaking.
pub fn withdraw(
    version: FarmVersion,
    accounts: &FarmWithdrawAccounts,
    pool_id: u64,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> std::result::Result<(), ProgramError> {
    let data = match version {
        FarmVersion::V1 => build_withdraw_data_v1(pool_id, amount).to_vec(),
        FarmVersion::V2 => {
            build_withdraw_data_v2(pool_id, amount, accounts.reward_vault.key).to_vec()
        }
    };
    let ix = Instruction {
        program_id: *accounts.farm_program.key,
        accounts: accounts.metas(),
        data,
    };
    invoke_signed(&ix, &accounts.infos(), signer_seeds)
}

/// Read-through pending-reward query. The farm reports the quantity via
/// return data; the coordinator relays it without bookkeeping of its own.
pub fn pending_reward<'info>(
    farm_program: &AccountInfo<'info>,
    pool: &AccountInfo<'info>,
    user_stake: &AccountInfo<'info>,
    pool_id: u64,
) -> std::result::Result<u64, ProgramError> {
    let ix = Instruction {
        program_id: *farm_program.key,
        accounts: vec![
            AccountMeta::new_readonly(*pool.key, false),
            AccountMeta::new_readonly(*user_stake.key, false),
        ],
        data: build_pending_reward_data(pool_id).to_vec(),
    };
    invoke(
        &ix,
        &[pool.clone(), user_stake.clone(), farm_program.clone()],
    )?;

    let (responder, data) = get_return_data().ok_or(ProgramError::InvalidAccountData)?;
    if responder != *farm_program.key {
        return Err(ProgramError::InvalidAccountData);
    }
    parse_pending_reward(&data).ok_or(ProgramError::InvalidAccountData)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_data_layout() {
        let data = build_deposit_data(7, 1_000);
        assert_eq!(data.len(), 17);
        assert_eq!(data[0], DEPOSIT_IX);
        assert_eq!(u64::from_le_bytes(data[1..9].try_into().unwrap()), 7);
        assert_eq!(u64::from_le_bytes(data[9..17].try_into().unwrap()), 1_000);
    }

    #[test]
    fn test_withdraw_data_layouts_differ_by_version() {
        let recipient = Pubkey::new_unique();
        let v1 = build_withdraw_data_v1(3, 500);
        let v2 = build_withdraw_data_v2(3, 500, &recipient);

        assert_eq!(v1.len(), 17);
        assert_eq!(v2.len(), 49);
        assert_eq!(v1[0], WITHDRAW_IX);
        assert_eq!(v2[0], WITHDRAW_IX);
        // shared prefix, recipient appended only on V2
        assert_eq!(&v1[..], &v2[..17]);
        assert_eq!(&v2[17..49], recipient.as_ref());
    }

    #[test]
    fn test_pending_reward_roundtrip() {
        let data = build_pending_reward_data(24);
        assert_eq!(data[0], PENDING_REWARD_IX);
        assert_eq!(u64::from_le_bytes(data[1..9].try_into().unwrap()), 24);

        assert_eq!(parse_pending_reward(&42u64.to_le_bytes()), Some(42));
        assert_eq!(parse_pending_reward(&[0u8; 4]), None);
    }
}
