use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::*;
use crate::events::LiquidityProvided;
use crate::interface::farm::{self, FarmDepositAccounts, FarmVersion};
use crate::interface::router::{self, AddLiquiditySolParams, RouterSolAccounts};
use crate::math::miner_math;
use crate::state::*;
use crate::utils::*;

#[derive(Accounts)]
#[instruction(params: JoinProgramWithSolParams)]
pub struct JoinProgramWithSol<'info> {
    #[account(
        constraint = coordinator.is_operator(&operator.key()) @ MinerError::Unauthorized,
    )]
    pub coordinator: Account<'info, Coordinator>,

    #[account(mut)]
    pub operator: Signer<'info>,

    pub asset_mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [BALANCE_SEED, asset_mint.key().as_ref()],
        bump = token_balance.bump,
    )]
    pub token_balance: Account<'info, BalanceEntry>,

    #[account(
        mut,
        seeds = [BALANCE_SEED, NATIVE_ASSET.as_ref()],
        bump = native_balance.bump,
    )]
    pub native_balance: Account<'info, BalanceEntry>,

    #[account(
        mut,
        seeds = [TOKEN_VAULT_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub token_vault: Account<'info, TokenAccount>,

    /// Lamport custody for the native leg of pairs
    #[account(mut, seeds = [SOL_VAULT_SEED], bump)]
    pub sol_vault: SystemAccount<'info>,

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

    /// CHECK: router custody for the token leg
    #[account(mut)]
    pub amm_vault_token: UncheckedAccount<'info>,

    /// CHECK: router lamport custody
    #[account(mut)]
    pub amm_sol_vault: UncheckedAccount<'info>,

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

pub fn join_program_with_sol(
    ctx: Context<JoinProgramWithSol>,
    params: JoinProgramWithSolParams,
) -> Result<()> {
    if params.amount_token_desired == 0 || params.lamports_desired == 0 {
        return Err(MinerError::InvalidAmount.into());
    }

    // Both legs leave the ledger before the router sees the funds.
    ctx.accounts
        .token_balance
        .debit(params.amount_token_desired)?;
    ctx.accounts.native_balance.debit(params.lamports_desired)?;

    let pre_token = ctx.accounts.token_vault.amount;
    let pre_lamports = ctx.accounts.sol_vault.lamports();
    let pre_shares = ctx.accounts.share_vault.amount;

    let coordinator_bump = [ctx.accounts.coordinator.bump];
    let coordinator_seeds = coordinator_signer_seeds(&coordinator_bump);
    let sol_bump = [ctx.bumps.sol_vault];
    let sol_seeds = sol_vault_signer_seeds(&sol_bump);
    // The lamport vault co-signs so the router can pull the native leg.
    let signer_seeds: &[&[&[u8]]] = &[&coordinator_seeds[..], &sol_seeds[..]];

    let coordinator_info = ctx.accounts.coordinator.to_account_info();
    let token_program_info = ctx.accounts.token_program.to_account_info();
    let share_mint_info = ctx.accounts.share_mint.to_account_info();
    let share_vault_info = ctx.accounts.share_vault.to_account_info();
    let sol_vault_info = ctx.accounts.sol_vault.to_account_info();

    router::add_liquidity_sol(
        &RouterSolAccounts {
            router_program: &ctx.accounts.amm_router.to_account_info(),
            pool: &ctx.accounts.amm_pool.to_account_info(),
            pool_vault_token: &ctx.accounts.amm_vault_token.to_account_info(),
            pool_sol_vault: &ctx.accounts.amm_sol_vault.to_account_info(),
            lp_mint: &share_mint_info,
            source_token: &ctx.accounts.token_vault.to_account_info(),
            sol_source: &sol_vault_info,
            lp_destination: &share_vault_info,
            authority: &coordinator_info,
            token_program: &token_program_info,
            system_program: &ctx.accounts.system_program.to_account_info(),
        },
        &AddLiquiditySolParams {
            amount_token_desired: params.amount_token_desired,
            amount_token_min: params.amount_token_min,
            lamports_desired: params.lamports_desired,
            lamports_min: params.lamports_min,
            deadline: params.deadline,
        },
        signer_seeds,
    )
    .map_err(|_| error!(MinerError::LiquidityProvisionFailed))?;

    ctx.accounts.token_vault.reload()?;
    ctx.accounts.share_vault.reload()?;

    let used_token = miner_math::consumed(pre_token, ctx.accounts.token_vault.amount)?;
    let used_lamports = miner_math::consumed(pre_lamports, ctx.accounts.sol_vault.lamports())?;
    let shares_minted = miner_math::received(pre_shares, ctx.accounts.share_vault.amount)?;

    let (refund_lamports, refund_token) = miner_math::settle_provision(
        params.lamports_desired,
        used_lamports,
        params.lamports_min,
        params.amount_token_desired,
        used_token,
        params.amount_token_min,
        shares_minted,
    )?;
    ctx.accounts.native_balance.credit(refund_lamports)?;
    ctx.accounts.token_balance.credit(refund_token)?;

    let coordinator_only: &[&[&[u8]]] = &[&coordinator_seeds[..]];
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
        coordinator_only,
    )
    .map_err(|_| error!(MinerError::StakingFailed))?;

    ctx.accounts.share_vault.reload()?;
    if ctx.accounts.share_vault.amount != pre_shares {
        return Err(MinerError::StakingFailed.into());
    }

    emit!(LiquidityProvided {
        asset_a: NATIVE_ASSET,
        asset_b: ctx.accounts.asset_mint.key(),
        amount_a_used: used_lamports,
        amount_b_used: used_token,
        shares_minted,
        pool_id: params.pool_id,
        version: params.version,
    });
    msg!(
        "Provided {} lamports / {} tokens, staked {} shares into pool {}",
        used_lamports,
        used_token,
        shares_minted,
        params.pool_id
    );

    Ok(())
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct JoinProgramWithSolParams {
    pub amount_token_desired: u64,
    pub amount_token_min: u64,
    pub lamports_min: u64,
    pub lamports_desired: u64,
    pub pool_id: u64,
    pub version: FarmVersion,
    pub deadline: i64,
}
