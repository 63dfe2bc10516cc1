use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};

use crate::constants::*;
use crate::error::*;
use crate::events::Withdrawn;
use crate::state::*;
use crate::utils::*;

#[derive(Accounts)]
pub struct WithdrawSol<'info> {
    #[account(
        constraint = coordinator.is_operator(&operator.key()) @ MinerError::Unauthorized,
    )]
    pub coordinator: Account<'info, Coordinator>,

    #[account(
        mut,
        seeds = [BALANCE_SEED, NATIVE_ASSET.as_ref()],
        bump = balance.bump,
    )]
    pub balance: Account<'info, BalanceEntry>,

    /// Lamport custody for the native leg of pairs
    #[account(mut, seeds = [SOL_VAULT_SEED], bump)]
    pub sol_vault: SystemAccount<'info>,

    #[account(mut)]
    pub operator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn withdraw_sol(ctx: Context<WithdrawSol>, amount: u64) -> Result<()> {
    if amount == 0 {
        return Err(MinerError::InvalidAmount.into());
    }

    // Debit strictly before the outbound transfer.
    ctx.accounts.balance.debit(amount)?;

    let bump = [ctx.bumps.sol_vault];
    let seeds = sol_vault_signer_seeds(&bump);

    let ix = system_instruction::transfer(
        &ctx.accounts.sol_vault.key(),
        &ctx.accounts.operator.key(),
        amount,
    );
    invoke_signed(
        &ix,
        &[
            ctx.accounts.sol_vault.to_account_info(),
            ctx.accounts.operator.to_account_info(),
        ],
        &[&seeds[..]],
    )?;

    emit!(Withdrawn {
        asset: NATIVE_ASSET,
        amount,
    });
    msg!("Withdrew {} lamports to operator", amount);

    Ok(())
}
