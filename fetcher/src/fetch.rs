//! Fetching accounts from a cluster into the snapshot store

use crate::Config;
use account_snapshot::{AccountSnapshot, SnapshotStore};
use anyhow::{anyhow, bail, Context, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    account::Account,
    bpf_loader_upgradeable::{self, UpgradeableLoaderState},
    pubkey::Pubkey,
};
use std::collections::HashMap;
use std::path::Path;

/// Read-only account lookup
///
/// `Ok(None)` means the cluster has no account at the address; `Err` is a
/// transport failure.
#[allow(async_fn_in_trait)]
pub trait AccountSource {
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>>;
}

impl AccountSource for RpcClient {
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        let response = self
            .get_account_with_commitment(address, self.commitment())
            .await
            .context(format!("Failed to fetch account {} from {}", address, self.url()))?;
        Ok(response.value)
    }
}

/// Fetch `address` and store it as `name`
///
/// Fails if the account does not exist.
pub async fn fetch_and_save<S: AccountSource>(
    source: &S,
    store: &SnapshotStore,
    address: &Pubkey,
    name: &str,
) -> Result<AccountSnapshot> {
    let account = source
        .fetch_account(address)
        .await?
        .ok_or_else(|| anyhow!("No account info found for {}", address))?;

    let snapshot = AccountSnapshot::from(account);
    store
        .save(name, &snapshot)
        .context(format!("Failed to save snapshot {}", name))?;

    log::info!("Saved account {} to {}", address, name);
    Ok(snapshot)
}

/// Outcome of a batch fetch
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Snapshot names written
    pub saved: Vec<String>,

    /// Configured accounts the cluster did not return
    pub missing: Vec<String>,
}

/// Fetch every account in `config` and save it as `<subfolder>/<name>`
///
/// `connect` builds a source for an RPC URL; one source is made per distinct
/// URL. Missing accounts are logged and skipped. A transport or storage error
/// stops the batch.
pub async fn fetch_batch<S, F>(
    config: &Config,
    store: &SnapshotStore,
    mut connect: F,
) -> Result<BatchReport>
where
    S: AccountSource,
    F: FnMut(&str) -> S,
{
    let mut sources: HashMap<&str, S> = HashMap::new();
    let mut report = BatchReport::default();

    for entry in &config.accounts {
        let url = entry.rpc_url(config);
        let source = sources.entry(url).or_insert_with(|| connect(url));
        let name = entry.snapshot_name();

        match source.fetch_account(&entry.pubkey).await? {
            Some(account) => {
                store
                    .save(&name, &AccountSnapshot::from(account))
                    .context(format!("Failed to save snapshot {}", name))?;
                log::info!("Saved account {} to {}", entry.name, name);
                report.saved.push(name);
            }
            None => {
                log::error!("Failed to fetch account info for {}", entry.name);
                report.missing.push(name);
            }
        }
    }

    Ok(report)
}

/// Write the ELF bytes held in an upgradeable program's ProgramData account
///
/// Returns the number of bytes written.
pub async fn dump_program<S: AccountSource>(
    source: &S,
    program_data: &Pubkey,
    out: &Path,
) -> Result<usize> {
    let account = source
        .fetch_account(program_data)
        .await?
        .ok_or_else(|| anyhow!("No account info found for {}", program_data))?;

    if account.owner != bpf_loader_upgradeable::id() {
        log::warn!(
            "Account {} is owned by {}, not the upgradeable loader",
            program_data,
            account.owner
        );
    }

    let offset = UpgradeableLoaderState::size_of_programdata_metadata();
    if account.data.len() < offset {
        bail!(
            "Account {} holds {} bytes, shorter than the {}-byte ProgramData header",
            program_data,
            account.data.len(),
            offset
        );
    }

    let elf = &account.data[offset..];
    std::fs::write(out, elf).context(format!("Failed to write {}", out.display()))?;

    log::info!("Saved {} program bytes to {}", elf.len(), out.display());
    Ok(elf.len())
}
