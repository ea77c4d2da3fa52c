//! Anchor instruction discriminators

use sha2::{Digest, Sha256};

/// First 8 bytes of `sha256("global:<ix_name>")`
///
/// `ix_name` is the snake_case handler name, e.g. `create_amm`.
pub fn sighash(ix_name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(b"global:");
    hasher.update(ix_name.as_bytes());
    let hash = hasher.finalize();

    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}
