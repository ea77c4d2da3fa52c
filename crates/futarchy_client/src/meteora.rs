//! Meteora pool swaps, direct and through the arb bot

use crate::{sighash, ClientError};
use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

/// Swap amounts, in base units of the source and destination tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub struct SwapArgs {
    pub in_amount: u64,
    pub minimum_out_amount: u64,
}

/// Accounts of a Meteora dynamic pool swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeteoraSwapAccounts {
    pub pool: Pubkey,
    pub user_source_token: Pubkey,
    pub user_destination_token: Pubkey,
    pub a_vault: Pubkey,
    pub b_vault: Pubkey,
    pub a_token_vault: Pubkey,
    pub b_token_vault: Pubkey,
    pub a_vault_lp_mint: Pubkey,
    pub b_vault_lp_mint: Pubkey,
    pub a_vault_lp: Pubkey,
    pub b_vault_lp: Pubkey,
    pub admin_token_fee: Pubkey,
    pub user: Pubkey,
    pub vault_program: Pubkey,
    pub token_program: Pubkey,
}

impl MeteoraSwapAccounts {
    pub fn account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.pool, false),
            AccountMeta::new(self.user_source_token, false),
            AccountMeta::new(self.user_destination_token, false),
            AccountMeta::new(self.a_vault, false),
            AccountMeta::new(self.b_vault, false),
            AccountMeta::new(self.a_token_vault, false),
            AccountMeta::new(self.b_token_vault, false),
            AccountMeta::new(self.a_vault_lp_mint, false),
            AccountMeta::new(self.b_vault_lp_mint, false),
            AccountMeta::new(self.a_vault_lp, false),
            AccountMeta::new(self.b_vault_lp, false),
            AccountMeta::new(self.admin_token_fee, false),
            AccountMeta::new_readonly(self.user, true),
            AccountMeta::new_readonly(self.vault_program, false),
            AccountMeta::new_readonly(self.token_program, false),
        ]
    }
}

fn encode(ix_name: &str, args: &SwapArgs) -> Result<Vec<u8>, ClientError> {
    let mut data = sighash(ix_name).to_vec();
    args.serialize(&mut data)?;
    Ok(data)
}

/// Meteora pools `swap`
pub fn swap_instruction(
    meteora_program: &Pubkey,
    accounts: &MeteoraSwapAccounts,
    args: SwapArgs,
) -> Result<Instruction, ClientError> {
    Ok(Instruction {
        program_id: *meteora_program,
        accounts: accounts.account_metas(),
        data: encode("swap", &args)?,
    })
}

/// Arb bot `execute_swap`, which forwards the same swap to Meteora via CPI
pub fn execute_swap_instruction(
    arb_bot_program: &Pubkey,
    accounts: &MeteoraSwapAccounts,
    meteora_program: &Pubkey,
    args: SwapArgs,
) -> Result<Instruction, ClientError> {
    let mut metas = accounts.account_metas();
    metas.push(AccountMeta::new_readonly(*meteora_program, false));

    Ok(Instruction {
        program_id: *arb_bot_program,
        accounts: metas,
        data: encode("execute_swap", &args)?,
    })
}
