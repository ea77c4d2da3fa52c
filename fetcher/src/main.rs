//! Futarchy account fetcher
//!
//! One-shot scripts that pull accounts from a cluster into the snapshot store
//! used by the integration tests.

use account_snapshot::AccountSnapshot;
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use futarchy_fetcher::{
    config::{Config, DEFAULT_CONFIG_PATH},
    fetch,
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "futarchy-fetcher", about = "Snapshot cluster accounts for offline tests")]
struct Opts {
    /// Path to the TOML config
    #[arg(short, long, env = "FETCHER_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch one account and save it under NAME
    Fetch {
        address: Pubkey,
        name: String,
        #[arg(long)]
        rpc_url: Option<String>,
    },
    /// Fetch every account listed in the config
    Batch,
    /// Save the program bytes held in a ProgramData account
    DumpProgram {
        program_data: Pubkey,
        out: PathBuf,
        #[arg(long)]
        rpc_url: Option<String>,
    },
    /// Print a stored snapshot
    Show { name: String },
    /// Write a default config to the config path
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();

    match opts.command {
        Command::InitConfig => Config::write_default(&opts.config)?,
        Command::Fetch {
            address,
            name,
            rpc_url,
        } => {
            let config = Config::load_or_default(&opts.config);
            let store = config.snapshot_store();
            let client = connect(rpc_url.as_deref().unwrap_or(&config.json_rpc_url));
            fetch::fetch_and_save(&client, &store, &address, &name).await?;

            let loaded = store.load(&name)?;
            log_snapshot(&name, &loaded);
        }
        Command::Batch => {
            // The account list comes from the config, so a bad config is fatal here
            let config = Config::load(&opts.config)?;
            let store = config.snapshot_store();
            log::info!(
                "Fetching {} accounts into {}",
                config.accounts.len(),
                store.root().display()
            );
            let report = fetch::fetch_batch(&config, &store, connect).await?;
            log::info!(
                "Saved {} accounts, {} missing",
                report.saved.len(),
                report.missing.len()
            );
            if !report.missing.is_empty() {
                bail!("Missing accounts: {}", report.missing.join(", "));
            }
        }
        Command::DumpProgram {
            program_data,
            out,
            rpc_url,
        } => {
            let config = Config::load_or_default(&opts.config);
            let client = connect(rpc_url.as_deref().unwrap_or(&config.json_rpc_url));
            fetch::dump_program(&client, &program_data, &out).await?;
        }
        Command::Show { name } => {
            let snapshot = Config::load_or_default(&opts.config).snapshot_store().load(&name)?;
            log_snapshot(&name, &snapshot);
        }
    }

    Ok(())
}

fn connect(url: &str) -> RpcClient {
    log::info!("Connected to RPC: {}", url);
    RpcClient::new_with_commitment(url.to_string(), CommitmentConfig::confirmed())
}

fn log_snapshot(name: &str, snapshot: &AccountSnapshot) {
    log::info!(
        "{}: owner={} lamports={} executable={} rent_epoch={} data_len={}",
        name,
        snapshot.owner,
        snapshot.lamports,
        snapshot.executable,
        snapshot.rent_epoch,
        snapshot.data.len()
    );
}
