//! Account snapshots for offline test replay
//!
//! A snapshot is a point-in-time copy of one cluster account. It is stored as a
//! pair of files under a storage root: `<name>.json` holds the metadata and
//! `<name>.bin` holds the raw account data.

pub mod error;
pub mod snapshot;
pub mod store;

pub use error::*;
pub use snapshot::*;
pub use store::*;
