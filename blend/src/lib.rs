//! Rust-native tooling to operate the Blend Protocol on Soroban
//!
//! Blend pools, backstops and emitters are remote contracts; nothing in
//! this crate knows their logic. What it provides is the machinery every
//! deployment and maintenance task shares: building transactions, asking
//! the ledger to simulate them, signing, submitting and waiting until they
//! land, with failures classified so callers can react to them.

#![warn(missing_docs)]

#[doc(inline)]
pub use blend_pipeline as pipeline;

#[doc(inline)]
pub use blend_rpc as rpc;

pub mod ledger {
    //! Ledger primitives and transaction construction

    #[doc(inline)]
    pub use blend_primitives as primitives;

    #[doc(inline)]
    pub use blend_txbuilder as txbuilder;
}

#[doc(inline)]
pub use blend_crypto as crypto;

#[doc(inline)]
pub use blend_codec as codec;

#[doc(inline)]
pub use blend_wallet as wallet;
