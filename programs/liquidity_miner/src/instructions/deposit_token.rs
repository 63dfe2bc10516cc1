use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::*;
use crate::events::Deposited;
use crate::state::*;

/// Deposits are the one ungated entry point: any caller may fund the
/// ledger, since deposits only ever increase custody.
#[derive(Accounts)]
pub struct DepositToken<'info> {
    pub coordinator: Account<'info, Coordinator>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = BalanceEntry::LEN,
        seeds = [BALANCE_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub balance: Account<'info, BalanceEntry>,

    pub asset_mint: Account<'info, Mint>,

    #[account(
        init_if_needed,
        payer = depositor,
        token::mint = asset_mint,
        token::authority = coordinator,
        seeds = [TOKEN_VAULT_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub token_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = depositor_token_account.mint == asset_mint.key() @ MinerError::InvalidTokenMint,
        constraint = depositor_token_account.owner == depositor.key() @ MinerError::InvalidTokenAccount,
    )]
    pub depositor_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn deposit_token(ctx: Context<DepositToken>, amount: u64) -> Result<()> {
    if amount == 0 {
        return Err(MinerError::InvalidAmount.into());
    }

    let asset = ctx.accounts.asset_mint.key();
    let balance = &mut ctx.accounts.balance;
    if balance.is_uninitialized() {
        balance.initialize(asset, ctx.bumps.balance);
    }

    // Custody moves first, the ledger is credited with what was received.
    let cpi_accounts = Transfer {
        from: ctx.accounts.depositor_token_account.to_account_info(),
        to: ctx.accounts.token_vault.to_account_info(),
        authority: ctx.accounts.depositor.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, amount)?;

    ctx.accounts.balance.credit(amount)?;

    emit!(Deposited {
        asset,
        amount,
        depositor: ctx.accounts.depositor.key(),
    });
    msg!("Deposited {} of {}", amount, asset);

    Ok(())
}
