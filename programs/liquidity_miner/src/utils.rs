use crate::constants::*;

/// Coordinator signer seeds - returns seeds that can be used with CpiContext
/// or invoke_signed. The caller owns the bump binding.
pub fn coordinator_signer_seeds<'a>(bump: &'a [u8]) -> [&'a [u8]; 2] {
    [COORDINATOR_SEED, bump]
}

/// Signer seeds for the lamport custody vault.
pub fn sol_vault_signer_seeds<'a>(bump: &'a [u8]) -> [&'a [u8]; 2] {
    [SOL_VAULT_SEED, bump]
}
