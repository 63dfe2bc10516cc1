use anchor_lang::prelude::*;
use anchor_lang::solana_program::pubkey;

/// PDA seeds
pub const COORDINATOR_SEED: &[u8] = b"coordinator";
pub const BALANCE_SEED: &[u8] = b"balance";
pub const TOKEN_VAULT_SEED: &[u8] = b"token_vault";
pub const SOL_VAULT_SEED: &[u8] = b"sol_vault";

/// Ledger key for the base asset. The wrapped-SOL mint doubles as the
/// marker so token legs and the native leg share one ledger keyspace.
pub const NATIVE_ASSET: Pubkey = pubkey!("So11111111111111111111111111111111111111112");
