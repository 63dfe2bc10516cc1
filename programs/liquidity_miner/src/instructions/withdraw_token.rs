use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::*;
use crate::events::Withdrawn;
use crate::state::*;
use crate::utils::*;

#[derive(Accounts)]
pub struct WithdrawToken<'info> {
    #[account(
        constraint = coordinator.is_operator(&operator.key()) @ MinerError::Unauthorized,
    )]
    pub coordinator: Account<'info, Coordinator>,

    #[account(
        mut,
        seeds = [BALANCE_SEED, asset_mint.key().as_ref()],
        bump = balance.bump,
        constraint = balance.asset == asset_mint.key() @ MinerError::InvalidTokenMint,
    )]
    pub balance: Account<'info, BalanceEntry>,

    pub asset_mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [TOKEN_VAULT_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub token_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = operator_token_account.mint == asset_mint.key() @ MinerError::InvalidTokenMint,
        constraint = operator_token_account.owner == operator.key() @ MinerError::InvalidTokenAccount,
    )]
    pub operator_token_account: Account<'info, TokenAccount>,

    pub operator: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn withdraw_token(ctx: Context<WithdrawToken>, amount: u64) -> Result<()> {
    if amount == 0 {
        return Err(MinerError::InvalidAmount.into());
    }

    // Debit strictly before the outbound transfer.
    ctx.accounts.balance.debit(amount)?;

    let bump = [ctx.accounts.coordinator.bump];
    let seeds = coordinator_signer_seeds(&bump);
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.token_vault.to_account_info(),
        to: ctx.accounts.operator_token_account.to_account_info(),
        authority: ctx.accounts.coordinator.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token::transfer(cpi_ctx, amount)?;

    let asset = ctx.accounts.asset_mint.key();
    emit!(Withdrawn { asset, amount });
    msg!("Withdrew {} of {} to operator", amount, asset);

    Ok(())
}
