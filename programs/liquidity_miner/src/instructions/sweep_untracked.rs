use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};

use crate::constants::*;
use crate::error::*;
use crate::events::UntrackedSwept;
use crate::math::miner_math;
use crate::state::*;

/// Recovery path for custody the ledger does not know about: share tokens
/// orphaned by a failed stake, rewards settled outside the harvest flow,
/// or tokens transferred directly to a vault.
#[derive(Accounts)]
pub struct SweepUntracked<'info> {
    #[account(
        constraint = coordinator.is_operator(&operator.key()) @ MinerError::Unauthorized,
    )]
    pub coordinator: Account<'info, Coordinator>,

    #[account(mut)]
    pub operator: Signer<'info>,

    pub asset_mint: Account<'info, Mint>,

    #[account(
        init_if_needed,
        payer = operator,
        space = BalanceEntry::LEN,
        seeds = [BALANCE_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub balance: Account<'info, BalanceEntry>,

    #[account(
        seeds = [TOKEN_VAULT_SEED, asset_mint.key().as_ref()],
        bump,
        constraint = token_vault.mint == asset_mint.key() @ MinerError::InvalidTokenMint,
    )]
    pub token_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
}

pub fn sweep_untracked(ctx: Context<SweepUntracked>) -> Result<()> {
    let asset = ctx.accounts.asset_mint.key();
    let balance = &mut ctx.accounts.balance;
    if balance.is_uninitialized() {
        balance.initialize(asset, ctx.bumps.balance);
    }

    let excess = miner_math::untracked_excess(ctx.accounts.token_vault.amount, balance.free)?;
    balance.credit(excess)?;

    emit!(UntrackedSwept {
        asset,
        amount: excess,
    });
    msg!("Swept {} untracked units of {}", excess, asset);

    Ok(())
}
