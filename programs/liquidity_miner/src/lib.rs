use anchor_lang::prelude::*;
use instructions::*;
use interface::farm::FarmVersion;

pub mod constants;
pub mod error;
pub mod events;
mod instructions;
pub mod interface;
pub mod math;
pub mod state;
mod utils;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod liquidity_miner {
    use super::*;

    /// Initialize the coordinator, fixing the operator and the external
    /// program addresses
    pub fn initialize(
        ctx: Context<Initialize>,
        params: InitializeParams,
    ) -> Result<()> {
        instructions::initialize(ctx, params)
    }

    /// Deposit a fungible token into custody (any caller)
    pub fn deposit_token(
        ctx: Context<DepositToken>,
        amount: u64,
    ) -> Result<()> {
        instructions::deposit_token(ctx, amount)
    }

    /// Deposit lamports into custody (any caller)
    pub fn deposit_sol(
        ctx: Context<DepositSol>,
        amount: u64,
    ) -> Result<()> {
        instructions::deposit_sol(ctx, amount)
    }

    /// Supply a token pair to the AMM and stake the minted shares (only operator)
    pub fn join_program(
        ctx: Context<JoinProgram>,
        params: JoinProgramParams,
    ) -> Result<()> {
        instructions::join_program(ctx, params)
    }

    /// Supply a token/SOL pair to the AMM and stake the minted shares (only operator)
    pub fn join_program_with_sol(
        ctx: Context<JoinProgramWithSol>,
        params: JoinProgramWithSolParams,
    ) -> Result<()> {
        instructions::join_program_with_sol(ctx, params)
    }

    /// Query the farm for pending rewards on a pool
    pub fn check_rewards(
        ctx: Context<CheckRewards>,
        pool_id: u64,
        version: FarmVersion,
    ) -> Result<u64> {
        instructions::check_rewards(ctx, pool_id, version)
    }

    /// Harvest a pool and pay rewards out to the operator (only operator)
    pub fn withdraw_rewards(
        ctx: Context<WithdrawRewards>,
        pool_id: u64,
        share_amount: u64,
        version: FarmVersion,
        restake: bool,
    ) -> Result<()> {
        instructions::withdraw_rewards(ctx, pool_id, share_amount, version, restake)
    }

    /// Withdraw free token balance to the operator (only operator)
    pub fn withdraw_token(
        ctx: Context<WithdrawToken>,
        amount: u64,
    ) -> Result<()> {
        instructions::withdraw_token(ctx, amount)
    }

    /// Withdraw free lamport balance to the operator (only operator)
    pub fn withdraw_sol(
        ctx: Context<WithdrawSol>,
        amount: u64,
    ) -> Result<()> {
        instructions::withdraw_sol(ctx, amount)
    }

    /// Credit custody the ledger does not track (only operator)
    pub fn sweep_untracked(
        ctx: Context<SweepUntracked>,
    ) -> Result<()> {
        instructions::sweep_untracked(ctx)
    }
}
