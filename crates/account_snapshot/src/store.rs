//! Paired metadata/payload files under a storage root

use crate::{snapshot::SnapshotMetadata, AccountSnapshot, SnapshotError};
use solana_sdk::pubkey::Pubkey;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// Directory snapshots are kept in unless a caller picks another root
pub const DEFAULT_SNAPSHOT_ROOT: &str = "tests/accounts";

/// Reads and writes account snapshots keyed by a logical name
///
/// A name may contain `/` to place the pair in a subfolder of the root, e.g.
/// `meteora/pool` maps to `<root>/meteora/pool.json` and
/// `<root>/meteora/pool.bin`.
///
/// The two files are written one after the other. A process that dies between
/// the writes leaves a mismatched pair behind; callers that care must re-fetch.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the metadata document for `name`
    pub fn metadata_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", name))
    }

    /// Path of the raw data file for `name`
    pub fn payload_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.bin", name))
    }

    /// True when both halves of the pair are present
    pub fn exists(&self, name: &str) -> bool {
        self.metadata_path(name).is_file() && self.payload_path(name).is_file()
    }

    /// Persist `snapshot` under `name`, replacing any existing pair
    pub fn save(&self, name: &str, snapshot: &AccountSnapshot) -> Result<(), SnapshotError> {
        validate_name(name)?;

        let metadata_path = self.metadata_path(name);
        let payload_path = self.payload_path(name);

        if let Some(parent) = metadata_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SnapshotError::from_io(parent.to_path_buf(), e))?;
        }

        let metadata = SnapshotMetadata::from_snapshot(snapshot);
        let json = serde_json::to_string_pretty(&metadata).map_err(SnapshotError::Encode)?;

        fs::write(&metadata_path, json).map_err(|e| SnapshotError::from_io(metadata_path, e))?;
        fs::write(&payload_path, &snapshot.data)
            .map_err(|e| SnapshotError::from_io(payload_path, e))?;

        log::debug!(
            "Saved snapshot {} ({} bytes, owner {})",
            name,
            snapshot.data.len(),
            snapshot.owner
        );
        Ok(())
    }

    /// Restore the snapshot stored under `name`
    ///
    /// Both files are read before the metadata is parsed, so a missing half is
    /// always reported as [`SnapshotError::NotFound`].
    pub fn load(&self, name: &str) -> Result<AccountSnapshot, SnapshotError> {
        validate_name(name)?;

        let metadata_path = self.metadata_path(name);
        let payload_path = self.payload_path(name);

        let metadata_str = fs::read_to_string(&metadata_path)
            .map_err(|e| SnapshotError::from_io(metadata_path.clone(), e))?;
        let data = fs::read(&payload_path).map_err(|e| SnapshotError::from_io(payload_path, e))?;

        let metadata: SnapshotMetadata =
            serde_json::from_str(&metadata_str).map_err(|source| SnapshotError::Parse {
                path: metadata_path.clone(),
                source,
            })?;

        let owner = Pubkey::from_str(&metadata.owner).map_err(|_| SnapshotError::InvalidOwner {
            path: metadata_path,
            owner: metadata.owner.clone(),
        })?;

        log::debug!("Loaded snapshot {} ({} bytes)", name, data.len());

        Ok(AccountSnapshot {
            data,
            executable: metadata.executable,
            owner,
            rent_epoch: metadata.rent_epoch,
            lamports: metadata.lamports,
        })
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_ROOT)
    }
}

/// Names are relative paths that stay inside the root
pub fn validate_name(name: &str) -> Result<(), SnapshotError> {
    let path = Path::new(name);
    let escapes_root = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));

    if name.is_empty() || name.ends_with('/') || escapes_root {
        return Err(SnapshotError::InvalidName(name.to_string()));
    }
    Ok(())
}
