// Integration tests
//
// Multi-step ledger scenarios mirroring the on-chain flows: the handlers
// drive the same credit/debit/settle sequence against external deltas.

#[cfg(test)]
mod integration_tests {
    use anchor_lang::prelude::Pubkey;
    use liquidity_miner::constants::NATIVE_ASSET;
    use liquidity_miner::error::*;
    use liquidity_miner::math::miner_math;
    use liquidity_miner::state::*;

    fn funded(asset: Pubkey, amount: u64) -> BalanceEntry {
        let mut balance = BalanceEntry {
            asset,
            free: 0,
            bump: 255,
        };
        balance.credit(amount).unwrap();
        balance
    }

    #[test]
    fn test_join_program_with_sol_ledger_flow() {
        // Deposit 2 SOL and a quantity of token A, then pair all of the
        // SOL with token A at pool 0 on V1.
        let token_a = Pubkey::new_unique();
        let lamports_deposited = 2_000_000_000u64;
        let tokens_deposited = 1_000_000_000u64;

        let mut native = funded(NATIVE_ASSET, lamports_deposited);
        let mut token = funded(token_a, tokens_deposited);

        let lamports_desired = lamports_deposited;
        let tokens_desired = 600_000_000u64;

        // Debits happen before the router sees the funds
        native.debit(lamports_desired).unwrap();
        token.debit(tokens_desired).unwrap();

        // Router consumes the full native leg and part of the token leg
        let used_lamports = lamports_desired;
        let used_tokens = 580_000_000u64;
        let shares_minted = 740_000u64;

        let (refund_lamports, refund_tokens) = miner_math::settle_provision(
            lamports_desired,
            used_lamports,
            0,
            tokens_desired,
            used_tokens,
            0,
            shares_minted,
        )
        .unwrap();
        native.credit(refund_lamports).unwrap();
        token.credit(refund_tokens).unwrap();

        // The native balance drops to a non-negative remainder
        assert_eq!(native.balance(), lamports_deposited - used_lamports);
        // The token balance drops by exactly what the router consumed
        assert_eq!(token.balance(), tokens_deposited - used_tokens);

        // All three reported quantities are positive
        assert!(used_lamports > 0);
        assert!(used_tokens > 0);
        assert!(shares_minted > 0);

        // Every minted share is delegated; the share ledger never sees them
        let share_mint = Pubkey::new_unique();
        let share_balance = BalanceEntry {
            asset: share_mint,
            free: 0,
            bump: 255,
        };
        assert_eq!(share_balance.balance(), 0);
    }

    #[test]
    fn test_provision_failure_leaves_ledger_whole() {
        // A router reporting consumption below the caller's minimum fails
        // the settlement; the transaction unwind then restores the debits,
        // so the observable ledger is exactly the pre-call ledger.
        let token_a = Pubkey::new_unique();
        let token_b = Pubkey::new_unique();
        let mut balance_a = funded(token_a, 1_000);
        let mut balance_b = funded(token_b, 2_000);

        let snapshot_a = balance_a.balance();
        let snapshot_b = balance_b.balance();

        balance_a.debit(1_000).unwrap();
        balance_b.debit(2_000).unwrap();

        let result = miner_math::settle_provision(1_000, 700, 900, 2_000, 2_000, 0, 10);
        assert!(matches!(result, Err(MinerError::LiquidityProvisionFailed)));

        // Unwind, as transaction atomicity would
        balance_a.credit(1_000).unwrap();
        balance_b.credit(2_000).unwrap();
        assert_eq!(balance_a.balance(), snapshot_a);
        assert_eq!(balance_b.balance(), snapshot_b);
    }

    #[test]
    fn test_harvest_round_trip() {
        let reward_mint = Pubkey::new_unique();
        let mut reward = BalanceEntry {
            asset: reward_mint,
            free: 0,
            bump: 255,
        };

        let before_harvest = reward.balance();

        // Harvest credits whatever the farm paid out
        let harvested = 12_345u64;
        reward.credit(harvested).unwrap();
        assert!(reward.balance() > before_harvest);

        // The pay-out debit in the same operation nets it back out
        reward.debit(harvested).unwrap();
        assert_eq!(reward.balance(), before_harvest);
    }

    #[test]
    fn test_partial_unstake_without_restake_credits_shares() {
        let share_mint = Pubkey::new_unique();
        let mut share_balance = BalanceEntry {
            asset: share_mint,
            free: 0,
            bump: 255,
        };

        // Farm returns share tokens alongside the harvest; without the
        // re-stake policy they become a generic ledger asset.
        let shares_returned = 5_000u64;
        share_balance.credit(shares_returned).unwrap();
        assert_eq!(share_balance.balance(), shares_returned);

        // And they are withdrawable like any other asset
        share_balance.debit(shares_returned).unwrap();
        assert_eq!(share_balance.balance(), 0);
    }

    #[test]
    fn test_ledger_conservation_across_sequences() {
        let asset = Pubkey::new_unique();
        let mut balance = BalanceEntry {
            asset,
            free: 0,
            bump: 255,
        };

        let mut credits = 0u64;
        let mut debits = 0u64;

        for i in 1..=100u64 {
            let amount = i * 13;
            balance.credit(amount).unwrap();
            credits += amount;

            if i % 3 == 0 {
                let out = amount / 2;
                balance.debit(out).unwrap();
                debits += out;
            }
        }

        // Failed debits contribute nothing
        let overdraw = balance.balance() + 1;
        assert!(balance.debit(overdraw).is_err());

        assert_eq!(balance.balance(), credits - debits);
    }

    #[test]
    fn test_withdraw_more_than_tracked_balance() {
        let token_a = Pubkey::new_unique();
        let mut balance = funded(token_a, 750);

        let result = balance.debit(751);
        assert!(matches!(result, Err(MinerError::InsufficientBalance)));
        assert_eq!(balance.balance(), 750);

        // The exact balance is still withdrawable afterwards
        assert_eq!(balance.debit(750).unwrap(), 750);
        assert_eq!(balance.balance(), 0);
    }

    #[test]
    fn test_sweep_then_withdraw_recovers_orphaned_custody() {
        // Shares orphaned in custody: the vault holds more than the
        // ledger tracks. A sweep credits the difference exactly once.
        let share_mint = Pubkey::new_unique();
        let mut balance = funded(share_mint, 100);
        let vault_custody = 340u64;

        let excess = miner_math::untracked_excess(vault_custody, balance.balance()).unwrap();
        balance.credit(excess).unwrap();
        assert_eq!(balance.balance(), vault_custody);

        // A second sweep finds nothing
        assert!(matches!(
            miner_math::untracked_excess(vault_custody, balance.balance()),
            Err(MinerError::NothingToSweep)
        ));
    }
}
