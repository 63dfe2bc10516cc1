use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke, system_instruction};

use crate::constants::*;
use crate::error::*;
use crate::events::Deposited;
use crate::state::*;

#[derive(Accounts)]
pub struct DepositSol<'info> {
    pub coordinator: Account<'info, Coordinator>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = BalanceEntry::LEN,
        seeds = [BALANCE_SEED, NATIVE_ASSET.as_ref()],
        bump
    )]
    pub balance: Account<'info, BalanceEntry>,

    /// Lamport custody for the native leg of pairs
    #[account(mut, seeds = [SOL_VAULT_SEED], bump)]
    pub sol_vault: SystemAccount<'info>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn deposit_sol(ctx: Context<DepositSol>, amount: u64) -> Result<()> {
    if amount == 0 {
        return Err(MinerError::InvalidAmount.into());
    }

    let balance = &mut ctx.accounts.balance;
    if balance.is_uninitialized() {
        balance.initialize(NATIVE_ASSET, ctx.bumps.balance);
    }

    let ix = system_instruction::transfer(
        &ctx.accounts.depositor.key(),
        &ctx.accounts.sol_vault.key(),
        amount,
    );
    invoke(
        &ix,
        &[
            ctx.accounts.depositor.to_account_info(),
            ctx.accounts.sol_vault.to_account_info(),
        ],
    )?;

    ctx.accounts.balance.credit(amount)?;

    emit!(Deposited {
        asset: NATIVE_ASSET,
        amount,
        depositor: ctx.accounts.depositor.key(),
    });
    msg!("Deposited {} lamports", amount);

    Ok(())
}
