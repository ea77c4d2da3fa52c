//! Snapshot value type and its on-disk metadata document

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use solana_sdk::{account::Account, pubkey::Pubkey};

/// Point-in-time copy of one on-chain account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    /// Raw account data
    pub data: Vec<u8>,

    pub executable: bool,

    /// Program that owns the account
    pub owner: Pubkey,

    pub rent_epoch: u64,

    /// Balance in lamports
    pub lamports: u64,
}

impl From<Account> for AccountSnapshot {
    fn from(account: Account) -> Self {
        Self {
            data: account.data,
            executable: account.executable,
            owner: account.owner,
            rent_epoch: account.rent_epoch,
            lamports: account.lamports,
        }
    }
}

impl From<AccountSnapshot> for Account {
    fn from(snapshot: AccountSnapshot) -> Self {
        Account {
            lamports: snapshot.lamports,
            data: snapshot.data,
            owner: snapshot.owner,
            executable: snapshot.executable,
            rent_epoch: snapshot.rent_epoch,
        }
    }
}

/// Contents of `<name>.json`
///
/// Key names and order are part of the on-disk format; existing snapshot
/// files depend on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SnapshotMetadata {
    pub executable: bool,
    pub lamports: u64,
    /// Base58 owner address
    pub owner: String,
    #[serde(deserialize_with = "deserialize_rent_epoch")]
    pub rent_epoch: u64,
}

impl SnapshotMetadata {
    pub fn from_snapshot(snapshot: &AccountSnapshot) -> Self {
        Self {
            executable: snapshot.executable,
            lamports: snapshot.lamports,
            owner: snapshot.owner.to_string(),
            rent_epoch: snapshot.rent_epoch,
        }
    }
}

/// Rent epochs near `u64::MAX` are sometimes written as doubles
/// (`18446744073709552000`); integral values past the range saturate.
/// Negative or fractional epochs are rejected.
fn deserialize_rent_epoch<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Number::deserialize(deserializer)?;
    if let Some(epoch) = value.as_u64() {
        return Ok(epoch);
    }
    match value.as_f64() {
        Some(epoch) if epoch >= 0.0 && epoch.fract() == 0.0 => Ok(epoch as u64),
        _ => Err(D::Error::custom(format!("invalid rent epoch {}", value))),
    }
}
