//! Asymmetric keys used to sign ledger transactions

pub mod ed25519;
