//! Instruction builder errors

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// No bump seed produced an off-curve address
    #[error("Failed to derive {what} address under program {program_id}")]
    AddressDerivation {
        what: &'static str,
        program_id: Pubkey,
    },

    #[error("Failed to serialize instruction data: {0}")]
    Serialization(#[from] std::io::Error),
}
