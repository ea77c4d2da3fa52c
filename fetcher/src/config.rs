//! Fetcher configuration

use account_snapshot::{validate_name, SnapshotStore, DEFAULT_SNAPSHOT_ROOT};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::{pubkey, pubkey::Pubkey};
use std::collections::HashSet;

/// Config file used when neither `--config` nor `FETCHER_CONFIG` is given
pub const DEFAULT_CONFIG_PATH: &str = "fetcher-config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC URL used by accounts that don't name their own
    pub json_rpc_url: String,

    /// Directory snapshots are written to (`~` is expanded)
    #[serde(default = "default_snapshot_root")]
    pub snapshot_root: String,

    /// Accounts fetched by `batch`
    #[serde(default)]
    pub accounts: Vec<AccountEntry>,
}

/// One named account to snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntry {
    /// Logical name; becomes the file stem
    pub name: String,

    #[serde(with = "pubkey_string")]
    pub pubkey: Pubkey,

    /// Folder under the snapshot root, empty for the root itself
    #[serde(default)]
    pub subfolder: String,

    /// Per-account RPC override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
}

impl AccountEntry {
    /// Snapshot name, `<subfolder>/<name>`
    pub fn snapshot_name(&self) -> String {
        let subfolder = self.subfolder.trim_matches('/');
        if subfolder.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", subfolder, self.name)
        }
    }

    pub fn rpc_url<'a>(&'a self, config: &'a Config) -> &'a str {
        self.rpc_url.as_deref().unwrap_or(&config.json_rpc_url)
    }
}

fn default_snapshot_root() -> String {
    DEFAULT_SNAPSHOT_ROOT.to_string()
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn load(path: &str) -> Result<Self> {
        let config_path = shellexpand::tilde(path);
        let config_str = std::fs::read_to_string(config_path.as_ref())
            .context(format!("Failed to read config file: {}", path))?;

        Self::from_toml(&config_str)
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the batch fetch would trip over halfway through
    pub fn validate(&self) -> Result<()> {
        validate_url("json_rpc_url", &self.json_rpc_url)?;

        if self.snapshot_root.trim().is_empty() {
            bail!("snapshot_root must not be empty");
        }

        let mut seen = HashSet::new();
        for entry in &self.accounts {
            if entry.name.trim().is_empty() {
                bail!("Account {} has an empty name", entry.pubkey);
            }
            if entry.name.contains('/') {
                bail!("Account name {:?} must not contain '/'; use subfolder", entry.name);
            }
            if let Some(url) = &entry.rpc_url {
                validate_url(&format!("rpc_url of {}", entry.name), url)?;
            }

            let name = entry.snapshot_name();
            validate_name(&name)
                .context(format!("Account {} cannot be stored as {:?}", entry.pubkey, name))?;
            if !seen.insert(name) {
                bail!("Duplicate account {:?}", entry.snapshot_name());
            }
        }

        Ok(())
    }

    /// Like [`Config::load`], but falls back to mainnet defaults when the
    /// config is missing or invalid
    pub fn load_or_default(path: &str) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Failed to load config ({:#}), using default mainnet config", e);
            Self::default_mainnet()
        })
    }

    /// Snapshot store rooted at `snapshot_root`
    pub fn snapshot_store(&self) -> SnapshotStore {
        SnapshotStore::new(shellexpand::tilde(&self.snapshot_root).into_owned())
    }

    /// Mainnet defaults with the future pool account
    pub fn default_mainnet() -> Self {
        Self {
            json_rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            snapshot_root: default_snapshot_root(),
            accounts: vec![AccountEntry {
                name: "future-pool".to_string(),
                pubkey: pubkey!("H5JcH3r77iXRgP37cGZ4XFBJT4wSJmn3XYdzSFMjUqVM"),
                subfolder: String::new(),
                rpc_url: None,
            }],
        }
    }

    /// Write default config to file
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_mainnet();
        let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config")?;

        std::fs::write(path, toml_str).context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }
}

fn validate_url(field: &str, url: &str) -> Result<()> {
    if url.trim().is_empty() {
        bail!("{} must not be empty", field);
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("{} must be an http(s) URL, got {:?}", field, url);
    }
    Ok(())
}

/// Pubkeys are written as base58 strings
mod pubkey_string {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use solana_sdk::pubkey::Pubkey;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(pubkey: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(pubkey)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(|e| D::Error::custom(format!("invalid pubkey {}: {}", s, e)))
    }
}
