//! Ledger primitives and cbor codec for Soroban transactions
//!
//! Only the entities the submission pipeline needs are modelled here.
//! Operation bodies, ledger keys and authorization entries stay opaque
//! byte strings: they are produced by callers and consumed by contracts.

mod account;
mod network;
mod transaction;

pub use account::*;
pub use network::*;
pub use transaction::*;

pub use blend_codec::utils::Bytes;
pub use blend_codec::Fragment;
pub use blend_crypto::hash::Hash;

pub type TxHash = Hash;

/// Opaque authorization entry returned by simulation
pub type AuthEntry = Bytes;

/// Opaque ledger key, as listed in a footprint
pub type LedgerKey = Bytes;
