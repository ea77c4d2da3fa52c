//! `create_amm` instruction for the futarchy AMM program

use crate::{
    amm_address, amm_lp_mint_address, associated_token_address, sighash, ClientError,
    ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

/// Pool initialization parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateAmmParams {
    /// First TWAP observation recorded by the pool
    pub twap_initial_observation: u128,

    /// Largest move a single update may apply to the observation
    pub twap_max_observation_change_per_update: u128,

    /// Proposal the pool belongs to
    pub proposal: Pubkey,
}

/// Borsh layout of the instruction arguments
#[derive(BorshSerialize)]
struct CreateAmmArgs {
    twap_initial_observation: u128,
    twap_max_observation_change_per_update: u128,
    proposal: [u8; 32],
}

impl From<&CreateAmmParams> for CreateAmmArgs {
    fn from(params: &CreateAmmParams) -> Self {
        Self {
            twap_initial_observation: params.twap_initial_observation,
            twap_max_observation_change_per_update: params.twap_max_observation_change_per_update,
            proposal: params.proposal.to_bytes(),
        }
    }
}

/// Fully addressed `create_amm` call, ready to be turned into an [`Instruction`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAmm {
    pub program_id: Pubkey,
    pub user: Pubkey,
    pub amm: Pubkey,
    pub lp_mint: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub vault_ata_base: Pubkey,
    pub vault_ata_quote: Pubkey,
    pub params: CreateAmmParams,
}

/// Build the `create_amm` call for a base/quote pair
///
/// `user` pays for and signs the pool creation. Performs no I/O; the same
/// inputs always produce the same result.
pub fn create_amm(
    program_id: &Pubkey,
    user: &Pubkey,
    base_mint: &Pubkey,
    quote_mint: &Pubkey,
    params: CreateAmmParams,
) -> Result<CreateAmm, ClientError> {
    let (amm, _) = amm_address(program_id, base_mint, quote_mint, &params.proposal)?;
    let (lp_mint, _) = amm_lp_mint_address(program_id, &amm)?;
    let (vault_ata_base, _) = associated_token_address(&amm, base_mint)?;
    let (vault_ata_quote, _) = associated_token_address(&amm, quote_mint)?;

    Ok(CreateAmm {
        program_id: *program_id,
        user: *user,
        amm,
        lp_mint,
        base_mint: *base_mint,
        quote_mint: *quote_mint,
        vault_ata_base,
        vault_ata_quote,
        params,
    })
}

impl CreateAmm {
    pub fn account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.user, true),
            AccountMeta::new(self.amm, false),
            AccountMeta::new(self.lp_mint, false),
            AccountMeta::new_readonly(self.base_mint, false),
            AccountMeta::new_readonly(self.quote_mint, false),
            AccountMeta::new(self.vault_ata_base, false),
            AccountMeta::new(self.vault_ata_quote, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ]
    }

    /// Discriminator followed by the Borsh-encoded arguments
    pub fn data(&self) -> Result<Vec<u8>, ClientError> {
        let mut data = sighash("create_amm").to_vec();
        CreateAmmArgs::from(&self.params).serialize(&mut data)?;
        Ok(data)
    }

    pub fn instruction(&self) -> Result<Instruction, ClientError> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts: self.account_metas(),
            data: self.data()?,
        })
    }
}
