pub mod check_rewards;
pub mod deposit_sol;
pub mod deposit_token;
pub mod initialize;
pub mod join_program;
pub mod join_program_with_sol;
pub mod sweep_untracked;
pub mod withdraw_rewards;
pub mod withdraw_sol;
pub mod withdraw_token;

pub use check_rewards::*;
pub use deposit_sol::*;
pub use deposit_token::*;
pub use initialize::*;
pub use join_program::*;
pub use join_program_with_sol::*;
pub use sweep_untracked::*;
pub use withdraw_rewards::*;
pub use withdraw_sol::*;
pub use withdraw_token::*;
