use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::*;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = operator,
        space = Coordinator::LEN,
        seeds = [COORDINATOR_SEED],
        bump
    )]
    pub coordinator: Account<'info, Coordinator>,

    #[account(mut)]
    pub operator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    let coordinator = &mut ctx.accounts.coordinator;

    coordinator.initialize(
        ctx.accounts.operator.key(),
        params.amm_router,
        params.farm_v1,
        params.farm_v2,
        params.reward_mint,
        ctx.bumps.coordinator,
    )?;

    msg!("Coordinator initialized, operator {}", coordinator.operator);

    Ok(())
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeParams {
    pub amm_router: Pubkey,
    pub farm_v1: Pubkey,
    pub farm_v2: Pubkey,
    pub reward_mint: Pubkey,
}
