// Liquidity Miner Test Suite
//
// Unit tests for the coordinator's ledger, access guard, and settlement logic

#[cfg(test)]
mod miner_tests {
    use anchor_lang::prelude::Pubkey;
    use liquidity_miner::error::*;
    use liquidity_miner::interface::farm::FarmVersion;
    use liquidity_miner::math::{miner_math, SafeMath};
    use liquidity_miner::state::*;

    fn entry(asset: Pubkey) -> BalanceEntry {
        BalanceEntry {
            asset,
            free: 0,
            bump: 255,
        }
    }

    fn coordinator() -> (Coordinator, Pubkey) {
        let operator = Pubkey::new_unique();
        let mut coordinator = Coordinator::default();
        coordinator
            .initialize(
                operator,
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                254,
            )
            .unwrap();
        (coordinator, operator)
    }

    #[test]
    fn test_safe_math_operations() {
        // Test safe addition
        assert_eq!(10u64.safe_add(20).unwrap(), 30);
        assert!(u64::MAX.safe_add(1).is_err());

        // Test safe subtraction
        assert_eq!(20u64.safe_sub(10).unwrap(), 10);
        assert!(10u64.safe_sub(20).is_err());

        // Test safe multiplication
        assert_eq!(10u64.safe_mul(5).unwrap(), 50);
        assert!(u64::MAX.safe_mul(2).is_err());

        // Test safe division
        assert_eq!(20u64.safe_div(4).unwrap(), 5);
        assert!(20u64.safe_div(0).is_err());

        // u128 impls behave the same
        assert_eq!(10u128.safe_add(20).unwrap(), 30);
        assert!(u128::MAX.safe_mul(2).is_err());
        assert!(10u128.safe_div(0).is_err());
    }

    #[test]
    fn test_credit_accumulates() {
        let mut balance = entry(Pubkey::new_unique());
        balance.credit(100).unwrap();
        balance.credit(250).unwrap();
        assert_eq!(balance.balance(), 350);
    }

    #[test]
    fn test_debit_exact_balance_drives_to_zero() {
        let mut balance = entry(Pubkey::new_unique());
        balance.credit(1_000).unwrap();
        assert_eq!(balance.debit(1_000).unwrap(), 1_000);
        assert_eq!(balance.balance(), 0);
    }

    #[test]
    fn test_debit_above_balance_fails_without_change() {
        let mut balance = entry(Pubkey::new_unique());
        balance.credit(500).unwrap();

        let result = balance.debit(501);
        assert!(matches!(result, Err(MinerError::InsufficientBalance)));
        assert_eq!(balance.balance(), 500);
    }

    #[test]
    fn test_debit_from_empty_entry_fails() {
        let mut balance = entry(Pubkey::new_unique());
        assert!(matches!(
            balance.debit(1),
            Err(MinerError::InsufficientBalance)
        ));
        assert_eq!(balance.balance(), 0);
    }

    #[test]
    fn test_credit_overflow_protection() {
        let mut balance = entry(Pubkey::new_unique());
        balance.credit(u64::MAX).unwrap();
        assert!(matches!(balance.credit(1), Err(MinerError::MathOverflow)));
    }

    #[test]
    fn test_coordinator_initialize_rejects_default_keys() {
        let mut coordinator = Coordinator::default();
        let result = coordinator.initialize(
            Pubkey::default(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            255,
        );
        assert!(matches!(result, Err(MinerError::InvalidConfig)));
    }

    #[test]
    fn test_require_operator() {
        let (coordinator, operator) = coordinator();

        assert!(coordinator.require_operator(&operator).is_ok());

        let stranger = Pubkey::new_unique();
        assert!(matches!(
            coordinator.require_operator(&stranger),
            Err(MinerError::Unauthorized)
        ));
    }

    #[test]
    fn test_farm_program_dispatch() {
        let (coordinator, _) = coordinator();
        assert_eq!(coordinator.farm_program(FarmVersion::V1), coordinator.farm_v1);
        assert_eq!(coordinator.farm_program(FarmVersion::V2), coordinator.farm_v2);
        assert_ne!(
            coordinator.farm_program(FarmVersion::V1),
            coordinator.farm_program(FarmVersion::V2)
        );
    }

    #[test]
    fn test_settle_provision_full_consumption() {
        let (refund_a, refund_b) =
            miner_math::settle_provision(1_000, 1_000, 900, 2_000, 2_000, 1_800, 50).unwrap();
        assert_eq!(refund_a, 0);
        assert_eq!(refund_b, 0);
    }

    #[test]
    fn test_settle_provision_partial_consumption_refunds() {
        let (refund_a, refund_b) =
            miner_math::settle_provision(1_000, 940, 900, 2_000, 2_000, 0, 50).unwrap();
        assert_eq!(refund_a, 60);
        assert_eq!(refund_b, 0);
    }

    #[test]
    fn test_settle_provision_rejects_zero_shares() {
        let result = miner_math::settle_provision(1_000, 1_000, 0, 2_000, 2_000, 0, 0);
        assert!(matches!(result, Err(MinerError::LiquidityProvisionFailed)));
    }

    #[test]
    fn test_settle_provision_rejects_below_minimum() {
        let result = miner_math::settle_provision(1_000, 899, 900, 2_000, 2_000, 0, 50);
        assert!(matches!(result, Err(MinerError::LiquidityProvisionFailed)));

        let result = miner_math::settle_provision(1_000, 1_000, 900, 2_000, 1_799, 1_800, 50);
        assert!(matches!(result, Err(MinerError::LiquidityProvisionFailed)));
    }

    #[test]
    fn test_settle_provision_rejects_overconsumption() {
        // A router claiming to consume more than it was handed is a fault
        let result = miner_math::settle_provision(1_000, 1_001, 0, 2_000, 2_000, 0, 50);
        assert!(matches!(result, Err(MinerError::LiquidityProvisionFailed)));
    }

    #[test]
    fn test_settle_provision_rejects_one_sided_consumption() {
        let result = miner_math::settle_provision(1_000, 0, 0, 2_000, 2_000, 0, 50);
        assert!(matches!(result, Err(MinerError::LiquidityProvisionFailed)));
    }

    #[test]
    fn test_custody_deltas() {
        assert_eq!(miner_math::received(100, 175).unwrap(), 75);
        assert_eq!(miner_math::consumed(175, 100).unwrap(), 75);
        assert_eq!(miner_math::received(100, 100).unwrap(), 0);

        // Custody moving the wrong way is an arithmetic fault, not a zero
        assert!(miner_math::received(175, 100).is_err());
        assert!(miner_math::consumed(100, 175).is_err());
    }

    #[test]
    fn test_untracked_excess() {
        assert_eq!(miner_math::untracked_excess(150, 100).unwrap(), 50);
        assert!(matches!(
            miner_math::untracked_excess(100, 100),
            Err(MinerError::NothingToSweep)
        ));
        // A vault short of its tracked balance has nothing to sweep either
        assert!(matches!(
            miner_math::untracked_excess(90, 100),
            Err(MinerError::NothingToSweep)
        ));
    }

    #[test]
    fn test_miner_error_types() {
        // Verify all error kinds exist and are distinct
        let errors = vec![
            MinerError::Unauthorized,
            MinerError::InsufficientBalance,
            MinerError::InvalidAmount,
            MinerError::LiquidityProvisionFailed,
            MinerError::StakingFailed,
            MinerError::HarvestFailed,
            MinerError::MathOverflow,
            MinerError::DivisionByZero,
            MinerError::InvalidTokenMint,
            MinerError::InvalidTokenAccount,
            MinerError::InvalidFarmProgram,
            MinerError::InvalidRouterProgram,
            MinerError::InvalidConfig,
            MinerError::PendingRewardUnavailable,
            MinerError::NothingToSweep,
        ];
        assert_eq!(errors.len(), 15);
    }
}
