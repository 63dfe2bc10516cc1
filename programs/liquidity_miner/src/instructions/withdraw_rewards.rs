use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::*;
use crate::events::RewardsWithdrawn;
use crate::interface::farm::{self, FarmDepositAccounts, FarmVersion, FarmWithdrawAccounts};
use crate::math::miner_math;
use crate::state::*;
use crate::utils::*;

#[derive(Accounts)]
#[instruction(pool_id: u64, share_amount: u64, version: FarmVersion)]
pub struct WithdrawRewards<'info> {
    #[account(
        constraint = coordinator.is_operator(&operator.key()) @ MinerError::Unauthorized,
    )]
    pub coordinator: Account<'info, Coordinator>,

    #[account(mut)]
    pub operator: Signer<'info>,

    #[account(
        address = coordinator.reward_mint @ MinerError::InvalidTokenMint,
    )]
    pub reward_mint: Account<'info, Mint>,

    #[account(
        init_if_needed,
        payer = operator,
        space = BalanceEntry::LEN,
        seeds = [BALANCE_SEED, reward_mint.key().as_ref()],
        bump
    )]
    pub reward_balance: Account<'info, BalanceEntry>,

    #[account(
        init_if_needed,
        payer = operator,
        token::mint = reward_mint,
        token::authority = coordinator,
        seeds = [TOKEN_VAULT_SEED, reward_mint.key().as_ref()],
        bump
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = operator_reward_account.mint == reward_mint.key() @ MinerError::InvalidTokenMint,
        constraint = operator_reward_account.owner == operator.key() @ MinerError::InvalidTokenAccount,
    )]
    pub operator_reward_account: Account<'info, TokenAccount>,

    /// Pool-share mint of the staked position
    pub share_mint: Account<'info, Mint>,

    #[account(
        init_if_needed,
        payer = operator,
        space = BalanceEntry::LEN,
        seeds = [BALANCE_SEED, share_mint.key().as_ref()],
        bump
    )]
    pub share_balance: Account<'info, BalanceEntry>,

    #[account(
        mut,
        seeds = [TOKEN_VAULT_SEED, share_mint.key().as_ref()],
        bump
    )]
    pub share_vault: Account<'info, TokenAccount>,

    /// CHECK: validated against the configured farm for the version
    #[account(
        constraint = farm_program.key() == coordinator.farm_program(version) @ MinerError::InvalidFarmProgram,
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

/// Harvest a pool and pay the proceeds straight out to the operator.
/// `share_amount == 0` harvests without unstaking; a partial unstake
/// either re-stakes the returned shares in the same call or leaves them
/// as a withdrawable ledger balance.
pub fn withdraw_rewards(
    ctx: Context<WithdrawRewards>,
    pool_id: u64,
    share_amount: u64,
    version: FarmVersion,
    restake: bool,
) -> Result<()> {
    let reward_asset = ctx.accounts.reward_mint.key();
    if ctx.accounts.reward_balance.is_uninitialized() {
        let bump = ctx.bumps.reward_balance;
        ctx.accounts.reward_balance.initialize(reward_asset, bump);
    }

    let pre_reward = ctx.accounts.reward_vault.amount;
    let pre_shares = ctx.accounts.share_vault.amount;

    let bump = [ctx.accounts.coordinator.bump];
    let seeds = coordinator_signer_seeds(&bump);
    let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];

    let coordinator_info = ctx.accounts.coordinator.to_account_info();
    let token_program_info = ctx.accounts.token_program.to_account_info();
    let farm_program_info = ctx.accounts.farm_program.to_account_info();
    let farm_pool_info = ctx.accounts.farm_pool.to_account_info();
    let farm_user_stake_info = ctx.accounts.farm_user_stake.to_account_info();
    let farm_share_vault_info = ctx.accounts.farm_share_vault.to_account_info();
    let share_vault_info = ctx.accounts.share_vault.to_account_info();

    farm::withdraw(
        version,
        &FarmWithdrawAccounts {
            farm_program: &farm_program_info,
            pool: &farm_pool_info,
            user_stake: &farm_user_stake_info,
            farm_share_vault: &farm_share_vault_info,
            share_vault: &share_vault_info,
            reward_vault: &ctx.accounts.reward_vault.to_account_info(),
            authority: &coordinator_info,
            token_program: &token_program_info,
        },
        pool_id,
        share_amount,
        signer_seeds,
    )
    .map_err(|_| error!(MinerError::HarvestFailed))?;

    ctx.accounts.reward_vault.reload()?;
    ctx.accounts.share_vault.reload()?;

    // The harvested quantity is whatever the farm paid out, observed as
    // the reward vault delta.
    let harvested = miner_math::received(pre_reward, ctx.accounts.reward_vault.amount)?;
    let shares_returned = miner_math::received(pre_shares, ctx.accounts.share_vault.amount)?;

    ctx.accounts.reward_balance.credit(harvested)?;

    if shares_returned > 0 {
        if restake {
            farm::deposit(
                &FarmDepositAccounts {
                    farm_program: &farm_program_info,
                    pool: &farm_pool_info,
                    user_stake: &farm_user_stake_info,
                    farm_share_vault: &farm_share_vault_info,
                    share_vault: &share_vault_info,
                    authority: &coordinator_info,
                    token_program: &token_program_info,
                },
                pool_id,
                shares_returned,
                signer_seeds,
            )
            .map_err(|_| error!(MinerError::StakingFailed))?;

            ctx.accounts.share_vault.reload()?;
            if ctx.accounts.share_vault.amount != pre_shares {
                return Err(MinerError::StakingFailed.into());
            }
        } else {
            let share_asset = ctx.accounts.share_mint.key();
            if ctx.accounts.share_balance.is_uninitialized() {
                let bump = ctx.bumps.share_balance;
                ctx.accounts.share_balance.initialize(share_asset, bump);
            }
            ctx.accounts.share_balance.credit(shares_returned)?;
        }
    }

    // Harvest-then-pay-out: the credit and the matching debit happen in
    // the same operation, so rewards never sit as a free balance.
    if harvested > 0 {
        ctx.accounts.reward_balance.debit(harvested)?;

        let cpi_accounts = Transfer {
            from: ctx.accounts.reward_vault.to_account_info(),
            to: ctx.accounts.operator_reward_account.to_account_info(),
            authority: coordinator_info.clone(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            token_program_info.clone(),
            cpi_accounts,
            signer_seeds,
        );
        token::transfer(cpi_ctx, harvested)?;
    }

    emit!(RewardsWithdrawn {
        pool_id,
        version,
        reward_amount: harvested,
        shares_withdrawn: shares_returned,
    });
    msg!(
        "Harvested {} rewards from pool {} ({} shares returned)",
        harvested,
        pool_id,
        shares_returned
    );

    Ok(())
}
