use anchor_lang::prelude::*;

#[error_code]
pub enum MinerError {
    #[msg("Caller is not the operator")]
    Unauthorized,

    #[msg("Not enough tracked balance for this asset")]
    InsufficientBalance,

    #[msg("Invalid amount")]
    InvalidAmount,

    #[msg("Router consumed amounts outside the requested bounds")]
    LiquidityProvisionFailed,

    #[msg("Farm deposit failed, minted shares left in custody")]
    StakingFailed,

    #[msg("Farm harvest failed")]
    HarvestFailed,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Farm program does not match the configured version")]
    InvalidFarmProgram,

    #[msg("Router program does not match the configured router")]
    InvalidRouterProgram,

    #[msg("Invalid coordinator configuration")]
    InvalidConfig,

    #[msg("Farm did not report a pending reward")]
    PendingRewardUnavailable,

    #[msg("No untracked balance to sweep")]
    NothingToSweep,
}

pub type MinerResult<T = ()> = std::result::Result<T, MinerError>;
