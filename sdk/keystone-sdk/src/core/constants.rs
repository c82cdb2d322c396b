use solana_sdk::pubkey::Pubkey;

/// Keystone program id, matches the program's `declare_id!`
pub const KEYSTONE_PROGRAM_ID: Pubkey = Pubkey::new_from_array(keystone_program::ID);

/// Chain id used when none is configured
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Entry point identity used when none is configured
pub const DEFAULT_ENTRY_POINT: Pubkey = Pubkey::new_from_array([0xee; 32]);
