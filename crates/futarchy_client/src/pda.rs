//! Program-derived addresses used by the futarchy AMM

use crate::{ClientError, ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_PROGRAM_ID};
use solana_sdk::pubkey::Pubkey;

pub const AMM_SEED_PREFIX: &[u8] = b"amm__";
pub const AMM_LP_MINT_SEED_PREFIX: &[u8] = b"amm_lp_mint";

/// AMM for a base/quote pair under a proposal
pub fn amm_address(
    program_id: &Pubkey,
    base_mint: &Pubkey,
    quote_mint: &Pubkey,
    proposal: &Pubkey,
) -> Result<(Pubkey, u8), ClientError> {
    derive(
        "amm",
        &[
            AMM_SEED_PREFIX,
            base_mint.as_ref(),
            quote_mint.as_ref(),
            proposal.as_ref(),
        ],
        program_id,
    )
}

/// LP token mint owned by an AMM
pub fn amm_lp_mint_address(program_id: &Pubkey, amm: &Pubkey) -> Result<(Pubkey, u8), ClientError> {
    derive("amm lp mint", &[AMM_LP_MINT_SEED_PREFIX, amm.as_ref()], program_id)
}

/// Associated token account of `owner` for `mint` (classic token program)
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Result<(Pubkey, u8), ClientError> {
    derive(
        "associated token",
        &[owner.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
}

fn derive(
    what: &'static str,
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), ClientError> {
    Pubkey::try_find_program_address(seeds, program_id).ok_or(ClientError::AddressDerivation {
        what,
        program_id: *program_id,
    })
}
