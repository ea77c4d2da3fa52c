//! Account fetcher
//!
//! Pulls accounts from a cluster and stores them as snapshots so integration
//! tests can replay them without network access.

pub mod config;
pub mod fetch;

pub use config::{AccountEntry, Config};
