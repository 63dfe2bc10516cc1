use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::*;
use crate::events::LiquidityProvided;
use crate::interface::farm::{self, FarmDepositAccounts, FarmVersion};
use crate::interface::router::{self, AddLiquidityParams, RouterAccounts};
use crate::math::miner_math;
use crate::state::*;
use crate::utils::*;

#[derive(Accounts)]
#[instruction(params: JoinProgramParams)]
pub struct JoinProgram<'info> {
    #[account(
        constraint = coordinator.is_operator(&operator.key()) @ MinerError::Unauthorized,
    )]
    pub coordinator: Account<'info, Coordinator>,

    #[account(mut)]
    pub operator: Signer<'info>,

    pub asset_a_mint: Account<'info, Mint>,
    pub asset_b_mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [BALANCE_SEED, asset_a_mint.key().as_ref()],
        bump = balance_a.bump,
    )]
    pub balance_a: Account<'info, BalanceEntry>,

    #[account(
        mut,
        seeds = [BALANCE_SEED, asset_b_mint.key().as_ref()],
        bump = balance_b.bump,
    )]
    pub balance_b: Account<'info, BalanceEntry>,

    #[account(
        mut,
        seeds = [TOKEN_VAULT_SEED, asset_a_mint.key().as_ref()],
        bump
    )]
    pub vault_a: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [TOKEN_VAULT_SEED, asset_b_mint.key().as_ref()],
        bump
    )]
    pub vault_b: Account<'info, TokenAccount>,

    /// Pool-share mint of the target pair
    #[account(mut)]
    pub share_mint: Account<'info, Mint>,

    #[account(
        init_if_needed,
        payer = operator,
        token::mint = share_mint,
        token::authority = coordinator,
        seeds = [TOKEN_VAULT_SEED, share_mint.key().as_ref()],
        bump
    )]
    pub share_vault: Account<'info, TokenAccount>,

    /// CHECK: validated against the configured router
    #[account(
        constraint = amm_router.key() == coordinator.amm_router @ MinerError::InvalidRouterProgram,
    )]
    pub amm_router: UncheckedAccount<'info>,

    /// CHECK: router pool state, layout owned by the router
    #[account(mut)]
    pub amm_pool: UncheckedAccount<'info>,

    /// CHECK: router custody for asset A
    #[account(mut)]
    pub amm_vault_a: UncheckedAccount<'info>,

    /// CHECK: router custody for asset B
    #[account(mut)]
    pub amm_vault_b: UncheckedAccount<'info>,

    /// CHECK: validated against the configured farm for params.version
    #[account(
        constraint = farm_program.key() == coordinator.farm_program(params.version) @ MinerError::InvalidFarmProgram,
    )]
    pub farm_program: UncheckedAccount<'info>,

    /// CHECK: farm pool state, layout owned by the farm program
    #[account(mut)]
    pub farm_pool: UncheckedAccount<'info>,

    /// CHECK: farm per-user stake bookkeeping
    #[account(mut)]
    pub farm_user_stake: UncheckedAccount<'info>,

    /// CHECK: farm share-token custody
    #[account(mut)]
    pub farm_share_vault: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn join_program(ctx: Context<JoinProgram>, params: JoinProgramParams) -> Result<()> {
    if params.amount_a_desired == 0 || params.amount_b_desired == 0 {
        return Err(MinerError::InvalidAmount.into());
    }

    // Ledger debits come first so a reentrant call cannot spend the same
    // funds while custody sits with the router.
    ctx.accounts.balance_a.debit(params.amount_a_desired)?;
    ctx.accounts.balance_b.debit(params.amount_b_desired)?;

    let pre_a = ctx.accounts.vault_a.amount;
    let pre_b = ctx.accounts.vault_b.amount;
    let pre_shares = ctx.accounts.share_vault.amount;

    let bump = [ctx.accounts.coordinator.bump];
    let seeds = coordinator_signer_seeds(&bump);
    let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];

    let coordinator_info = ctx.accounts.coordinator.to_account_info();
    let token_program_info = ctx.accounts.token_program.to_account_info();
    let share_mint_info = ctx.accounts.share_mint.to_account_info();
    let share_vault_info = ctx.accounts.share_vault.to_account_info();

    router::add_liquidity(
        &RouterAccounts {
            router_program: &ctx.accounts.amm_router.to_account_info(),
            pool: &ctx.accounts.amm_pool.to_account_info(),
            pool_vault_a: &ctx.accounts.amm_vault_a.to_account_info(),
            pool_vault_b: &ctx.accounts.amm_vault_b.to_account_info(),
            lp_mint: &share_mint_info,
            source_a: &ctx.accounts.vault_a.to_account_info(),
            source_b: &ctx.accounts.vault_b.to_account_info(),
            lp_destination: &share_vault_info,
            authority: &coordinator_info,
            token_program: &token_program_info,
        },
        &AddLiquidityParams {
            amount_a_desired: params.amount_a_desired,
            amount_b_desired: params.amount_b_desired,
            amount_a_min: params.amount_a_min,
            amount_b_min: params.amount_b_min,
            deadline: params.deadline,
        },
        signer_seeds,
    )
    .map_err(|_| error!(MinerError::LiquidityProvisionFailed))?;

    ctx.accounts.vault_a.reload()?;
    ctx.accounts.vault_b.reload()?;
    ctx.accounts.share_vault.reload()?;

    let used_a = miner_math::consumed(pre_a, ctx.accounts.vault_a.amount)?;
    let used_b = miner_math::consumed(pre_b, ctx.accounts.vault_b.amount)?;
    let shares_minted = miner_math::received(pre_shares, ctx.accounts.share_vault.amount)?;

    let (refund_a, refund_b) = miner_math::settle_provision(
        params.amount_a_desired,
        used_a,
        params.amount_a_min,
        params.amount_b_desired,
        used_b,
        params.amount_b_min,
        shares_minted,
    )?;
    ctx.accounts.balance_a.credit(refund_a)?;
    ctx.accounts.balance_b.credit(refund_b)?;

    // Every minted share is delegated to the farm; none stay in custody
    // and the ledger never tracks them.
    farm::deposit(
        &FarmDepositAccounts {
            farm_program: &ctx.accounts.farm_program.to_account_info(),
            pool: &ctx.accounts.farm_pool.to_account_info(),
            user_stake: &ctx.accounts.farm_user_stake.to_account_info(),
            farm_share_vault: &ctx.accounts.farm_share_vault.to_account_info(),
            share_vault: &share_vault_info,
            authority: &coordinator_info,
            token_program: &token_program_info,
        },
        params.pool_id,
        shares_minted,
        signer_seeds,
    )
    .map_err(|_| error!(MinerError::StakingFailed))?;

    ctx.accounts.share_vault.reload()?;
    if ctx.accounts.share_vault.amount != pre_shares {
        return Err(MinerError::StakingFailed.into());
    }

    emit!(LiquidityProvided {
        asset_a: ctx.accounts.asset_a_mint.key(),
        asset_b: ctx.accounts.asset_b_mint.key(),
        amount_a_used: used_a,
        amount_b_used: used_b,
        shares_minted,
        pool_id: params.pool_id,
        version: params.version,
    });
    msg!(
        "Provided {} / {} liquidity, staked {} shares into pool {}",
        used_a,
        used_b,
        shares_minted,
        params.pool_id
    );

    Ok(())
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct JoinProgramParams {
    pub amount_a_desired: u64,
    pub amount_b_desired: u64,
    pub amount_a_min: u64,
    pub amount_b_min: u64,
    pub pool_id: u64,
    pub version: FarmVersion,
    pub deadline: i64,
}
