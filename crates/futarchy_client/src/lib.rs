//! Futarchy client
//!
//! Builds unsigned instructions for the futarchy AMM, the Meteora pools swap,
//! and the arb bot. Addresses the programs expect are derived locally, so no
//! RPC lookup is needed before signing.

pub mod create_amm;
pub mod error;
pub mod meteora;
pub mod pda;
pub mod program_ids;
pub mod sighash;

pub use create_amm::*;
pub use error::*;
pub use meteora::*;
pub use pda::*;
pub use program_ids::*;
pub use sighash::*;
