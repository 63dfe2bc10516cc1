use anchor_lang::prelude::*;

use crate::error::*;
use crate::interface::farm::{self, FarmVersion};
use crate::state::*;

/// Read-only query; no guard and no ledger change.
#[derive(Accounts)]
#[instruction(pool_id: u64, version: FarmVersion)]
pub struct CheckRewards<'info> {
    pub coordinator: Account<'info, Coordinator>,

    /// CHECK: validated against the configured farm for the version
    #[account(
        constraint = farm_program.key() == coordinator.farm_program(version) @ MinerError::InvalidFarmProgram,
    )]
    pub farm_program: UncheckedAccount<'info>,

    /// CHECK: farm pool state, layout owned by the farm program
    pub farm_pool: UncheckedAccount<'info>,

    /// CHECK: farm per-user stake bookkeeping
    pub farm_user_stake: UncheckedAccount<'info>,
}

pub fn check_rewards(ctx: Context<CheckRewards>, pool_id: u64, _version: FarmVersion) -> Result<u64> {
    let pending = farm::pending_reward(
        &ctx.accounts.farm_program.to_account_info(),
        &ctx.accounts.farm_pool.to_account_info(),
        &ctx.accounts.farm_user_stake.to_account_info(),
        pool_id,
    )
    .map_err(|_| error!(MinerError::PendingRewardUnavailable))?;

    msg!("Pending rewards for pool {}: {}", pool_id, pending);

    Ok(pending)
}
