//! Cryptographic hashes for ledger entities
//!
//! we expose two helper objects:
//!
//! * [`Hasher`] to stream bytes or CBOR-encoded entities into a `SHA-256`
//!   digest without building intermediary buffers
//! * [`struct@Hash`] the resulting 32 bytes digest
//!
//! # Example
//!
//! ```
//! use blend_crypto::hash::Hasher;
//!
//! let mut hasher = Hasher::new();
//! hasher.input(b"abc");
//!
//! let digest = hasher.finalize();
//! # assert_eq!(
//! #   "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
//! #   hex::encode(digest)
//! # );
//! ```

#[allow(clippy::module_inception)]
mod hash;
mod hasher;

pub use self::{hash::Hash, hasher::Hasher};
