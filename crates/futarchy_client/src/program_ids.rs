//! Well-known program addresses

use solana_sdk::{pubkey, pubkey::Pubkey};

pub use solana_sdk::system_program::ID as SYSTEM_PROGRAM_ID;

/// SPL Token program
pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// SPL Associated Token Account program
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

/// Meteora dynamic AMM pools
pub const METEORA_POOLS_PROGRAM_ID: Pubkey =
    pubkey!("Eo7WjKq67rjJQSZxS6z3YkapzY3eMj6Xy8X5EQVn5UaB");

pub const ARB_BOT_PROGRAM_ID: Pubkey = pubkey!("A43He8159Wx79j1tzZQqqfKTRNoj5xA3ScKRrgGo8Jb");

pub const AUTOCRAT_MIGRATOR_PROGRAM_ID: Pubkey =
    pubkey!("MigRDW6uxyNMDBD8fX2njCRyJC4YZk2Rx9pDUZiAESt");
